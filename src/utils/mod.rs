/*
 *
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Storing and loading structures.

All structures of this crate derive [ε-serde](epserde)'s traits: fields are
written in the order of declaration, and the same order must be used to read
them back. These helpers just wrap a file in a buffer and map I/O and
(de)serialization failures into an [`Error`](crate::error::Error).

```rust
# use succinct::prelude::*;
# let dir = tempfile::tempdir()?;
let path = dir.path().join("rank_sel");
let rs = Rank9Sel::new(bit_vec![0, 1, 1, 0]);
store(&rs, &path)?;
let loaded: Rank9Sel = load(&path)?;
assert_eq!(loaded.select(1)?, 2);
# Ok::<(), succinct::error::Error>(())
```

*/

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use epserde::deser::Deserialize;
use epserde::ser::Serialize;

use crate::error::Result;

/// Stores a structure in a file, returning the number of bytes written.
pub fn store<S: Serialize>(value: &S, path: impl AsRef<Path>) -> Result<usize> {
    let mut file = BufWriter::new(File::create(path.as_ref())?);
    #[allow(unused_unsafe)]
    let bytes = unsafe { value.serialize(&mut file) }?;
    file.flush()?;
    Ok(bytes)
}

/// Loads a structure from a file written by [`store`].
pub fn load<D: Deserialize>(path: impl AsRef<Path>) -> Result<D> {
    let mut file = BufReader::new(File::open(path.as_ref())?);
    #[allow(unused_unsafe)]
    let value = unsafe { D::deserialize_full(&mut file) }?;
    Ok(value)
}

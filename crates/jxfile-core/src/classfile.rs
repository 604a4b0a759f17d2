//! Nesting and access hints read from class file bytes.
//!
//! Only the parts of the format needed for the hints are decoded: the
//! constant pool is walked to resolve names, members are skipped, and the
//! `InnerClasses` attribute is searched for the entry describing the class
//! itself.

use serde::{Deserialize, Serialize};

use crate::error::FileObjectError;
use crate::hints::{Modifier, NestingKind};

const MAGIC: u32 = 0xCAFE_BABE;
const INNER_CLASSES: &str = "InnerClasses";

/// Access flag bits shared by classes and inner class entries.
pub mod access_flags {
    pub const ACC_PUBLIC: u16 = 0x0001;
    pub const ACC_PRIVATE: u16 = 0x0002;
    pub const ACC_PROTECTED: u16 = 0x0004;
    pub const ACC_STATIC: u16 = 0x0008;
    pub const ACC_FINAL: u16 = 0x0010;
    pub const ACC_INTERFACE: u16 = 0x0200;
    pub const ACC_ABSTRACT: u16 = 0x0400;
    pub const ACC_SYNTHETIC: u16 = 0x1000;
    pub const ACC_ANNOTATION: u16 = 0x2000;
    pub const ACC_ENUM: u16 = 0x4000;
    pub const ACC_MODULE: u16 = 0x8000;
}

/// Hints decoded from a class file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassFileHints {
    /// Binary name of the class in internal form, e.g. `com/example/Outer$Inner`.
    pub internal_name: String,
    /// Major version of the class file format.
    pub major_version: u16,
    /// Nesting kind; `None` for `module-info`.
    pub nesting_kind: Option<NestingKind>,
    /// Access level, if the class declares one.
    pub access_level: Option<Modifier>,
}

impl ClassFileHints {
    /// Decode hints from the bytes of a class file.
    pub fn read(bytes: &[u8]) -> Result<Self, FileObjectError> {
        let mut reader = ByteReader::new(bytes);

        if reader.u4()? != MAGIC {
            return Err(FileObjectError::class_file("bad magic number"));
        }
        let _minor = reader.u2()?;
        let major_version = reader.u2()?;

        let pool = ConstantPool::read(&mut reader)?;

        let class_flags = reader.u2()?;
        let this_class = reader.u2()?;
        let internal_name = pool.class_name(this_class)?.to_string();
        let _super_class = reader.u2()?;

        let interfaces = reader.u2()?;
        reader.skip(usize::from(interfaces) * 2)?;
        skip_members(&mut reader)?; // fields
        skip_members(&mut reader)?; // methods

        if class_flags & access_flags::ACC_MODULE != 0 {
            return Ok(Self {
                internal_name,
                major_version,
                nesting_kind: None,
                access_level: None,
            });
        }

        let mut hints = Self {
            internal_name,
            major_version,
            nesting_kind: Some(NestingKind::TopLevel),
            access_level: access_level(class_flags & access_flags::ACC_PUBLIC),
        };

        let attributes = reader.u2()?;
        for _ in 0..attributes {
            let name_index = reader.u2()?;
            let length = reader.u4()? as usize;
            if pool.utf8(name_index)? != INNER_CLASSES {
                reader.skip(length)?;
                continue;
            }

            let classes = reader.u2()?;
            for _ in 0..classes {
                let inner_class = reader.u2()?;
                let outer_class = reader.u2()?;
                let inner_name = reader.u2()?;
                let inner_flags = reader.u2()?;
                if inner_class != this_class {
                    continue;
                }

                (hints.nesting_kind, hints.access_level) = match (outer_class, inner_name) {
                    (0, 0) => (Some(NestingKind::Anonymous), None),
                    (0, _) => (Some(NestingKind::Local), None),
                    _ => (Some(NestingKind::Member), access_level(inner_flags)),
                };
            }
        }

        Ok(hints)
    }

    /// Binary name with `.` package separators, e.g. `com.example.Outer$Inner`.
    pub fn binary_name(&self) -> String {
        self.internal_name.replace('/', ".")
    }
}

/// Map access flags to the declared access level.
fn access_level(flags: u16) -> Option<Modifier> {
    if flags & access_flags::ACC_PUBLIC != 0 {
        Some(Modifier::Public)
    } else if flags & access_flags::ACC_PROTECTED != 0 {
        Some(Modifier::Protected)
    } else if flags & access_flags::ACC_PRIVATE != 0 {
        Some(Modifier::Private)
    } else {
        None
    }
}

fn skip_members(reader: &mut ByteReader<'_>) -> Result<(), FileObjectError> {
    let count = reader.u2()?;
    for _ in 0..count {
        reader.skip(6)?; // access_flags, name_index, descriptor_index
        let attributes = reader.u2()?;
        for _ in 0..attributes {
            reader.skip(2)?;
            let length = reader.u4()? as usize;
            reader.skip(length)?;
        }
    }
    Ok(())
}

#[derive(Debug)]
enum Constant {
    Utf8(String),
    Class { name_index: u16 },
    Other,
    /// Second slot of a long or double.
    Unusable,
}

#[derive(Debug)]
struct ConstantPool {
    entries: Vec<Constant>,
}

impl ConstantPool {
    fn read(reader: &mut ByteReader<'_>) -> Result<Self, FileObjectError> {
        let count = reader.u2()?;
        let mut entries = Vec::with_capacity(usize::from(count));
        // Index 0 is never valid.
        entries.push(Constant::Unusable);

        while entries.len() < usize::from(count) {
            let tag = reader.u1()?;
            match tag {
                1 => {
                    let length = usize::from(reader.u2()?);
                    let bytes = reader.take(length)?;
                    entries.push(Constant::Utf8(String::from_utf8_lossy(bytes).into_owned()));
                }
                7 => entries.push(Constant::Class {
                    name_index: reader.u2()?,
                }),
                3 | 4 => {
                    reader.skip(4)?;
                    entries.push(Constant::Other);
                }
                5 | 6 => {
                    reader.skip(8)?;
                    entries.push(Constant::Other);
                    entries.push(Constant::Unusable);
                }
                8 | 16 | 19 | 20 => {
                    reader.skip(2)?;
                    entries.push(Constant::Other);
                }
                9 | 10 | 11 | 12 | 17 | 18 => {
                    reader.skip(4)?;
                    entries.push(Constant::Other);
                }
                15 => {
                    reader.skip(3)?;
                    entries.push(Constant::Other);
                }
                _ => {
                    return Err(FileObjectError::class_file(format!(
                        "unknown constant pool tag {tag} at entry {}",
                        entries.len()
                    )));
                }
            }
        }

        Ok(Self { entries })
    }

    fn utf8(&self, index: u16) -> Result<&str, FileObjectError> {
        match self.entries.get(usize::from(index)) {
            Some(Constant::Utf8(value)) => Ok(value),
            _ => Err(FileObjectError::class_file(format!(
                "constant {index} is not a UTF-8 entry"
            ))),
        }
    }

    fn class_name(&self, index: u16) -> Result<&str, FileObjectError> {
        match self.entries.get(usize::from(index)) {
            Some(Constant::Class { name_index }) => self.utf8(*name_index),
            _ => Err(FileObjectError::class_file(format!(
                "constant {index} is not a class entry"
            ))),
        }
    }
}

struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], FileObjectError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.bytes.len())
            .ok_or_else(|| {
                FileObjectError::class_file(format!("truncated at offset {}", self.pos))
            })?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn skip(&mut self, len: usize) -> Result<(), FileObjectError> {
        self.take(len).map(|_| ())
    }

    fn u1(&mut self) -> Result<u8, FileObjectError> {
        Ok(self.take(1)?[0])
    }

    fn u2(&mut self) -> Result<u16, FileObjectError> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn u4(&mut self) -> Result<u32, FileObjectError> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal class file: pool of [Utf8 name, Class #1, Utf8 "InnerClasses"].
    fn class_bytes(name: &str, flags: u16, inner: Option<(u16, u16, u16)>) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&MAGIC.to_be_bytes());
        out.extend_from_slice(&0u16.to_be_bytes());
        out.extend_from_slice(&61u16.to_be_bytes());

        out.extend_from_slice(&6u16.to_be_bytes());
        out.push(1);
        out.extend_from_slice(&(name.len() as u16).to_be_bytes());
        out.extend_from_slice(name.as_bytes());
        out.push(7);
        out.extend_from_slice(&1u16.to_be_bytes());
        out.push(1);
        out.extend_from_slice(&(INNER_CLASSES.len() as u16).to_be_bytes());
        out.extend_from_slice(INNER_CLASSES.as_bytes());
        out.push(5); // long, takes entries 4 and 5
        out.extend_from_slice(&[0; 8]);

        out.extend_from_slice(&flags.to_be_bytes());
        out.extend_from_slice(&2u16.to_be_bytes()); // this_class
        out.extend_from_slice(&0u16.to_be_bytes()); // super_class
        out.extend_from_slice(&0u16.to_be_bytes()); // interfaces
        out.extend_from_slice(&0u16.to_be_bytes()); // fields
        out.extend_from_slice(&0u16.to_be_bytes()); // methods

        match inner {
            None => out.extend_from_slice(&0u16.to_be_bytes()),
            Some((outer, inner_name, inner_flags)) => {
                out.extend_from_slice(&1u16.to_be_bytes());
                out.extend_from_slice(&3u16.to_be_bytes());
                out.extend_from_slice(&10u32.to_be_bytes());
                out.extend_from_slice(&1u16.to_be_bytes());
                out.extend_from_slice(&2u16.to_be_bytes());
                out.extend_from_slice(&outer.to_be_bytes());
                out.extend_from_slice(&inner_name.to_be_bytes());
                out.extend_from_slice(&inner_flags.to_be_bytes());
            }
        }
        out
    }

    #[test]
    fn test_top_level_public() {
        let hints = ClassFileHints::read(&class_bytes(
            "com/example/Foo",
            access_flags::ACC_PUBLIC | access_flags::ACC_FINAL,
            None,
        ))
        .unwrap();
        assert_eq!(hints.nesting_kind, Some(NestingKind::TopLevel));
        assert_eq!(hints.access_level, Some(Modifier::Public));
        assert_eq!(hints.binary_name(), "com.example.Foo");
        assert_eq!(hints.major_version, 61);
    }

    #[test]
    fn test_top_level_package_private() {
        let hints = ClassFileHints::read(&class_bytes("Foo", 0, None)).unwrap();
        assert_eq!(hints.access_level, None);
    }

    #[test]
    fn test_private_member() {
        let bytes = class_bytes("Outer$Inner", 0, Some((2, 1, access_flags::ACC_PRIVATE)));
        let hints = ClassFileHints::read(&bytes).unwrap();
        assert_eq!(hints.nesting_kind, Some(NestingKind::Member));
        assert_eq!(hints.access_level, Some(Modifier::Private));
    }

    #[test]
    fn test_local_and_anonymous() {
        let local = ClassFileHints::read(&class_bytes("Outer$1Helper", 0, Some((0, 1, 0)))).unwrap();
        assert_eq!(local.nesting_kind, Some(NestingKind::Local));
        assert_eq!(local.access_level, None);

        let anonymous = ClassFileHints::read(&class_bytes("Outer$1", 0, Some((0, 0, 0)))).unwrap();
        assert_eq!(anonymous.nesting_kind, Some(NestingKind::Anonymous));
    }

    #[test]
    fn test_module_info_has_no_nesting() {
        let hints =
            ClassFileHints::read(&class_bytes("module-info", access_flags::ACC_MODULE, None)).unwrap();
        assert_eq!(hints.nesting_kind, None);
    }

    #[test]
    fn test_bad_magic() {
        let mut bytes = class_bytes("Foo", 0, None);
        bytes[0] = 0;
        assert!(matches!(
            ClassFileHints::read(&bytes),
            Err(FileObjectError::InvalidClassFile { .. })
        ));
    }

    #[test]
    fn test_truncated() {
        let bytes = class_bytes("Foo", 0, None);
        assert!(ClassFileHints::read(&bytes[..bytes.len() - 3]).is_err());
    }
}

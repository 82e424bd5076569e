//! Module contains XDR data structures related to directories for NFS version 3 protocol
//! as defined in RFC 1813.
//!
//! This module includes data structures for the following directory operations:
//! - LOOKUP: Look up a name in a directory (procedure 3)
//! - CREATE: Create a regular file (procedure 8)
//! - MKDIR: Create a directory (procedure 9)
//! - SYMLINK: Create a symbolic link (procedure 10)
//! - MKNOD: Create a special device (procedure 11)
//! - REMOVE: Remove a file (procedure 12)
//! - RMDIR: Remove a directory (procedure 13)
//! - RENAME: Rename a file or directory (procedure 14)
//! - READDIR: Read from a directory (procedure 16)
//! - READDIRPLUS: Extended read from a directory (procedure 17)

// Preserve original RFC naming conventions (e.g. READDIR3args, MKDIR3resok)
// for consistency with the NFS version 3 protocol specification
#![allow(non_camel_case_types)]

use std::io::{Read, Write};

use super::*;

/// Arguments for the LOOKUP procedure (procedure 3)
/// as defined in RFC 1813 section 3.3.3
#[allow(non_camel_case_types)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LOOKUP3args {
    /// Directory to search and the name to look up
    pub what: diropargs3,
}
DeserializeStruct!(LOOKUP3args, what);
SerializeStruct!(LOOKUP3args, what);

#[allow(non_camel_case_types)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LOOKUP3resok {
    /// File handle of the object found
    pub object: nfs_fh3,
    /// Attributes of the object found
    pub obj_attributes: post_op_attr,
    /// Attributes of the searched directory
    pub dir_attributes: post_op_attr,
}
DeserializeStruct!(LOOKUP3resok, object, obj_attributes, dir_attributes);
SerializeStruct!(LOOKUP3resok, object, obj_attributes, dir_attributes);

#[allow(non_camel_case_types)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LOOKUP3resfail {
    pub dir_attributes: post_op_attr,
}
DeserializeStruct!(LOOKUP3resfail, dir_attributes);
SerializeStruct!(LOOKUP3resfail, dir_attributes);

pub type LOOKUP3res = Nfs3Result<LOOKUP3resok, LOOKUP3resfail>;

/// How CREATE treats an existing file of the same name,
/// as defined in RFC 1813 section 3.3.8
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum createhow3 {
    /// Create the file, or truncate it if it already exists
    UNCHECKED(sattr3),
    /// Fail with NFS3ERR_EXIST if the file already exists
    GUARDED(sattr3),
    /// Exclusive create, made idempotent by the verifier
    EXCLUSIVE(createverf3),
}

impl Default for createhow3 {
    fn default() -> createhow3 {
        createhow3::UNCHECKED(sattr3::default())
    }
}

impl Serialize for createhow3 {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        match self {
            createhow3::UNCHECKED(attributes) => {
                0_u32.serialize(dest)?;
                attributes.serialize(dest)
            }
            createhow3::GUARDED(attributes) => {
                1_u32.serialize(dest)?;
                attributes.serialize(dest)
            }
            createhow3::EXCLUSIVE(verf) => {
                2_u32.serialize(dest)?;
                verf.serialize(dest)
            }
        }
    }

    fn packed_size(&self) -> usize {
        4 + match self {
            createhow3::UNCHECKED(attributes) | createhow3::GUARDED(attributes) => {
                attributes.packed_size()
            }
            createhow3::EXCLUSIVE(verf) => verf.packed_size(),
        }
    }
}

impl Deserialize for createhow3 {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        *self = match deserialize::<u32>(src)? {
            0 => createhow3::UNCHECKED(deserialize(src)?),
            1 => createhow3::GUARDED(deserialize(src)?),
            2 => createhow3::EXCLUSIVE(deserialize(src)?),
            mode => {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("Invalid createmode3 value: {mode}"),
                ))
            }
        };
        Ok(())
    }
}

/// Arguments for the CREATE procedure (procedure 8)
/// as defined in RFC 1813 section 3.3.8
#[allow(non_camel_case_types)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CREATE3args {
    /// Directory where the file should be created and its name
    pub dirops: diropargs3,
    /// Creation mode and initial attributes
    pub how: createhow3,
}
DeserializeStruct!(CREATE3args, dirops, how);
SerializeStruct!(CREATE3args, dirops, how);

/// Successful response of the procedures creating a new object:
/// CREATE, MKDIR, SYMLINK and MKNOD.
#[allow(non_camel_case_types)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CREATE3resok {
    /// File handle of the new object
    pub obj: post_op_fh3,
    /// Attributes of the new object
    pub obj_attributes: post_op_attr,
    /// Attributes of the parent directory
    pub dir_wcc: wcc_data,
}
DeserializeStruct!(CREATE3resok, obj, obj_attributes, dir_wcc);
SerializeStruct!(CREATE3resok, obj, obj_attributes, dir_wcc);

#[allow(non_camel_case_types)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CREATE3resfail {
    pub dir_wcc: wcc_data,
}
DeserializeStruct!(CREATE3resfail, dir_wcc);
SerializeStruct!(CREATE3resfail, dir_wcc);

pub type CREATE3res = Nfs3Result<CREATE3resok, CREATE3resfail>;

/// Arguments for the MKDIR procedure (procedure 9)
/// as defined in RFC 1813 section 3.3.9
/// Used to create a new directory
#[allow(non_camel_case_types)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MKDIR3args {
    /// Directory where new directory should be created and its name
    pub dirops: diropargs3,
    /// Initial attributes for the new directory
    pub attributes: sattr3,
}
DeserializeStruct!(MKDIR3args, dirops, attributes);
SerializeStruct!(MKDIR3args, dirops, attributes);

pub type MKDIR3resok = CREATE3resok;
pub type MKDIR3resfail = CREATE3resfail;
pub type MKDIR3res = Nfs3Result<MKDIR3resok, MKDIR3resfail>;

/// Arguments for the SYMLINK procedure (procedure 10)
/// as defined in RFC 1813 section 3.3.10
/// Used to create a symbolic link
#[allow(non_camel_case_types)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SYMLINK3args {
    /// Directory where symbolic link should be created and its name
    pub dirops: diropargs3,
    /// Target path and attributes for the symbolic link
    pub symlink: symlinkdata3,
}
DeserializeStruct!(SYMLINK3args, dirops, symlink);
SerializeStruct!(SYMLINK3args, dirops, symlink);

pub type SYMLINK3resok = CREATE3resok;
pub type SYMLINK3resfail = CREATE3resfail;
pub type SYMLINK3res = Nfs3Result<SYMLINK3resok, SYMLINK3resfail>;

/// Attributes and device numbers of a character or block special file
/// as defined in RFC 1813 section 3.3.11
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct devicedata3 {
    /// Initial attributes of the device file
    pub dev_attributes: sattr3,
    /// Major and minor device numbers
    pub spec: specdata3,
}
DeserializeStruct!(devicedata3, dev_attributes, spec);
SerializeStruct!(devicedata3, dev_attributes, spec);

/// Type of the special file MKNOD creates, switched on [`ftype3`]
/// as defined in RFC 1813 section 3.3.11
///
/// Regular files, directories and symbolic links carry no data; servers
/// answer them with NFS3ERR_BADTYPE.
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum mknoddata3 {
    NF3CHR(devicedata3),
    NF3BLK(devicedata3),
    NF3SOCK(sattr3),
    NF3FIFO(sattr3),
    NF3REG,
    NF3DIR,
    NF3LNK,
}

impl Default for mknoddata3 {
    fn default() -> mknoddata3 {
        mknoddata3::NF3FIFO(sattr3::default())
    }
}

impl mknoddata3 {
    /// The union discriminant.
    pub fn ftype(&self) -> ftype3 {
        match self {
            mknoddata3::NF3CHR(_) => ftype3::NF3CHR,
            mknoddata3::NF3BLK(_) => ftype3::NF3BLK,
            mknoddata3::NF3SOCK(_) => ftype3::NF3SOCK,
            mknoddata3::NF3FIFO(_) => ftype3::NF3FIFO,
            mknoddata3::NF3REG => ftype3::NF3REG,
            mknoddata3::NF3DIR => ftype3::NF3DIR,
            mknoddata3::NF3LNK => ftype3::NF3LNK,
        }
    }
}

impl Serialize for mknoddata3 {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        self.ftype().serialize(dest)?;
        match self {
            mknoddata3::NF3CHR(device) | mknoddata3::NF3BLK(device) => device.serialize(dest),
            mknoddata3::NF3SOCK(attributes) | mknoddata3::NF3FIFO(attributes) => {
                attributes.serialize(dest)
            }
            mknoddata3::NF3REG | mknoddata3::NF3DIR | mknoddata3::NF3LNK => Ok(()),
        }
    }

    fn packed_size(&self) -> usize {
        4 + match self {
            mknoddata3::NF3CHR(device) | mknoddata3::NF3BLK(device) => device.packed_size(),
            mknoddata3::NF3SOCK(attributes) | mknoddata3::NF3FIFO(attributes) => {
                attributes.packed_size()
            }
            mknoddata3::NF3REG | mknoddata3::NF3DIR | mknoddata3::NF3LNK => 0,
        }
    }
}

impl Deserialize for mknoddata3 {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        *self = match deserialize::<ftype3>(src)? {
            ftype3::NF3CHR => mknoddata3::NF3CHR(deserialize(src)?),
            ftype3::NF3BLK => mknoddata3::NF3BLK(deserialize(src)?),
            ftype3::NF3SOCK => mknoddata3::NF3SOCK(deserialize(src)?),
            ftype3::NF3FIFO => mknoddata3::NF3FIFO(deserialize(src)?),
            ftype3::NF3REG => mknoddata3::NF3REG,
            ftype3::NF3DIR => mknoddata3::NF3DIR,
            ftype3::NF3LNK => mknoddata3::NF3LNK,
        };
        Ok(())
    }
}

/// Arguments for the MKNOD procedure (procedure 11)
/// as defined in RFC 1813 section 3.3.11
/// Used to create a special device file, FIFO, or socket
#[allow(non_camel_case_types)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MKNOD3args {
    /// Directory where the special file should be created and its name
    pub where_dir: diropargs3,
    /// Type and device information for the special file
    pub what: mknoddata3,
}
DeserializeStruct!(MKNOD3args, where_dir, what);
SerializeStruct!(MKNOD3args, where_dir, what);

pub type MKNOD3resok = CREATE3resok;
pub type MKNOD3resfail = CREATE3resfail;
pub type MKNOD3res = Nfs3Result<MKNOD3resok, MKNOD3resfail>;

/// Arguments for the REMOVE procedure (procedure 12)
/// as defined in RFC 1813 section 3.3.12
#[allow(non_camel_case_types)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct REMOVE3args {
    /// Directory and name of the entry to remove
    pub object: diropargs3,
}
DeserializeStruct!(REMOVE3args, object);
SerializeStruct!(REMOVE3args, object);

/// Result body of REMOVE and RMDIR, identical on success and failure
#[allow(non_camel_case_types)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct REMOVE3resok {
    pub dir_wcc: wcc_data,
}
DeserializeStruct!(REMOVE3resok, dir_wcc);
SerializeStruct!(REMOVE3resok, dir_wcc);

pub type REMOVE3resfail = REMOVE3resok;
pub type REMOVE3res = Nfs3Result<REMOVE3resok, REMOVE3resfail>;

/// Arguments for the RMDIR procedure (procedure 13)
/// as defined in RFC 1813 section 3.3.13
#[allow(non_camel_case_types)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RMDIR3args {
    /// Parent directory and name of the directory to remove
    pub object: diropargs3,
}
DeserializeStruct!(RMDIR3args, object);
SerializeStruct!(RMDIR3args, object);

pub type RMDIR3resok = REMOVE3resok;
pub type RMDIR3resfail = REMOVE3resok;
pub type RMDIR3res = Nfs3Result<RMDIR3resok, RMDIR3resfail>;

/// Arguments for the RENAME procedure (procedure 14)
/// as defined in RFC 1813 section 3.3.14
#[allow(non_camel_case_types)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RENAME3args {
    /// Source directory and name
    pub from: diropargs3,
    /// Target directory and name
    pub to: diropargs3,
}
DeserializeStruct!(RENAME3args, from, to);
SerializeStruct!(RENAME3args, from, to);

#[allow(non_camel_case_types)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RENAME3resok {
    pub fromdir_wcc: wcc_data,
    pub todir_wcc: wcc_data,
}
DeserializeStruct!(RENAME3resok, fromdir_wcc, todir_wcc);
SerializeStruct!(RENAME3resok, fromdir_wcc, todir_wcc);

pub type RENAME3resfail = RENAME3resok;
pub type RENAME3res = Nfs3Result<RENAME3resok, RENAME3resfail>;

/// Directory entry returned by READDIR operation
/// as defined in RFC 1813 section 3.3.16
#[allow(non_camel_case_types)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct entry3 {
    /// File identifier (inode number)
    pub fileid: fileid3,
    /// Name of the directory entry
    pub name: filename3,
    /// Cookie for the next READDIR operation
    pub cookie: cookie3,
}
DeserializeStruct!(entry3, fileid, name, cookie);
SerializeStruct!(entry3, fileid, name, cookie);

/// Arguments for the READDIR procedure (procedure 16)
/// as defined in RFC 1813 section 3.3.16
/// Used to read entries from a directory. The server returns a variable number of directory entries,
/// up to the specified count limit.
#[allow(non_camel_case_types)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct READDIR3args {
    /// File handle for the directory to be read
    pub dir: nfs_fh3,
    /// Cookie indicating where to start reading directory entries
    /// A cookie value of 0 means start at beginning of directory
    pub cookie: cookie3,
    /// Cookie verifier to detect whether directory has changed
    pub cookieverf: cookieverf3,
    /// Maximum number of bytes of directory information to return
    pub count: count3,
}
DeserializeStruct!(READDIR3args, dir, cookie, cookieverf, count);
SerializeStruct!(READDIR3args, dir, cookie, cookieverf, count);

/// Entries of one READDIR reply. On the wire the entries form an XDR
/// linked list followed by the `eof` flag.
#[allow(non_camel_case_types)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct dirlist3 {
    pub entries: Vec<entry3>,
    /// True if the last entry of the directory is included
    pub eof: bool,
}

impl Serialize for dirlist3 {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        crate::xdr::serialize_list(&self.entries, dest)?;
        self.eof.serialize(dest)
    }

    fn packed_size(&self) -> usize {
        crate::xdr::list_packed_size(&self.entries) + 4
    }
}

impl Deserialize for dirlist3 {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        self.entries = crate::xdr::deserialize_list(src)?;
        self.eof.deserialize(src)
    }
}

#[allow(non_camel_case_types)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct READDIR3resok {
    pub dir_attributes: post_op_attr,
    pub cookieverf: cookieverf3,
    pub reply: dirlist3,
}
DeserializeStruct!(READDIR3resok, dir_attributes, cookieverf, reply);
SerializeStruct!(READDIR3resok, dir_attributes, cookieverf, reply);

#[allow(non_camel_case_types)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct READDIR3resfail {
    pub dir_attributes: post_op_attr,
}
DeserializeStruct!(READDIR3resfail, dir_attributes);
SerializeStruct!(READDIR3resfail, dir_attributes);

pub type READDIR3res = Nfs3Result<READDIR3resok, READDIR3resfail>;

/// Directory entry with additional attributes for READDIRPLUS operation
/// as defined in RFC 1813 section 3.3.17
#[allow(non_camel_case_types)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct entryplus3 {
    /// File identifier (inode number) uniquely identifying the file within the filesystem
    pub fileid: fileid3,
    /// Name of the directory entry (filename)
    pub name: filename3,
    /// Cookie value that can be used in subsequent READDIRPLUS calls to resume listing
    pub cookie: cookie3,
    /// File attributes for this directory entry
    pub name_attributes: post_op_attr,
    /// File handle for this directory entry
    pub name_handle: post_op_fh3,
}
DeserializeStruct!(entryplus3, fileid, name, cookie, name_attributes, name_handle);
SerializeStruct!(entryplus3, fileid, name, cookie, name_attributes, name_handle);

/// Arguments for the READDIRPLUS procedure (procedure 17)
/// as defined in RFC 1813 section 3.3.17
/// READDIRPLUS returns directory entries along with their attributes and file handles.
#[allow(non_camel_case_types)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct READDIRPLUS3args {
    /// Directory file handle
    pub dir: nfs_fh3,
    /// Cookie from previous READDIRPLUS - where to start reading
    pub cookie: cookie3,
    /// Cookie verifier to detect changed directories
    pub cookieverf: cookieverf3,
    /// Maximum number of bytes of directory information to return
    pub dircount: count3,
    /// Maximum number of bytes of attribute information to return
    pub maxcount: count3,
}
DeserializeStruct!(READDIRPLUS3args, dir, cookie, cookieverf, dircount, maxcount);
SerializeStruct!(READDIRPLUS3args, dir, cookie, cookieverf, dircount, maxcount);

#[allow(non_camel_case_types)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct dirlistplus3 {
    pub entries: Vec<entryplus3>,
    pub eof: bool,
}

impl Serialize for dirlistplus3 {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        crate::xdr::serialize_list(&self.entries, dest)?;
        self.eof.serialize(dest)
    }

    fn packed_size(&self) -> usize {
        crate::xdr::list_packed_size(&self.entries) + 4
    }
}

impl Deserialize for dirlistplus3 {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        self.entries = crate::xdr::deserialize_list(src)?;
        self.eof.deserialize(src)
    }
}

#[allow(non_camel_case_types)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct READDIRPLUS3resok {
    pub dir_attributes: post_op_attr,
    pub cookieverf: cookieverf3,
    pub reply: dirlistplus3,
}
DeserializeStruct!(READDIRPLUS3resok, dir_attributes, cookieverf, reply);
SerializeStruct!(READDIRPLUS3resok, dir_attributes, cookieverf, reply);

pub type READDIRPLUS3resfail = READDIR3resfail;
pub type READDIRPLUS3res = Nfs3Result<READDIRPLUS3resok, READDIRPLUS3resfail>;

//! File System Utilities module turns backend file metadata into NFS attributes.
//!
//! This module contains:
//! - [`FileStat`], the stat-like record a backend hands to the protocol layer
//! - `fattr3::create`, which builds the wire attributes from it
//! - Conversions between NFS times and [`SystemTime`] or [`filetime::FileTime`]
//! - `with_*` builders that fill the attribute slots of procedure results

use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[cfg(unix)]
use std::fs::Metadata;
#[cfg(unix)]
use std::os::unix::fs::MetadataExt;

use tracing::debug;

use crate::protocol::xdr::nfs3::{
    self, dir, fattr3, file, fs, ftype3, nfstime3, post_op_attr, pre_op_attr, set_time3,
    specdata3, wcc_attr, wcc_data,
};

/// Bit mask of the file type in a Unix mode.
pub const S_IFMT: u32 = 0o170000;
pub const S_IFSOCK: u32 = 0o140000;
pub const S_IFLNK: u32 = 0o120000;
pub const S_IFREG: u32 = 0o100000;
pub const S_IFBLK: u32 = 0o060000;
pub const S_IFDIR: u32 = 0o040000;
pub const S_IFCHR: u32 = 0o020000;
pub const S_IFIFO: u32 = 0o010000;

/// Permission, setuid, setgid and sticky bits.
const PERMISSION_MASK: u32 = 0o7777;

/// Bytes per block in `st_blocks`.
const STAT_BLOCK_SIZE: u64 = 512;

/// File metadata as supplied by a file system backend.
///
/// `mode` is a full Unix mode: the type bits select the [`ftype3`], the
/// remaining bits become the NFS mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileStat {
    pub mode: u32,
    pub nlink: u32,
    pub uid: u32,
    pub gid: u32,
    pub size: u64,
    /// Bytes allocated on disk
    pub used: u64,
    /// Major and minor number of a device file
    pub rdev: (u32, u32),
    /// Identifier of the containing file system
    pub fsid: u64,
    pub fileid: u64,
    pub atime: SystemTime,
    pub mtime: SystemTime,
    pub ctime: SystemTime,
}

impl Default for FileStat {
    fn default() -> FileStat {
        FileStat {
            mode: S_IFREG | 0o644,
            nlink: 1,
            uid: 0,
            gid: 0,
            size: 0,
            used: 0,
            rdev: (0, 0),
            fsid: 0,
            fileid: 0,
            atime: UNIX_EPOCH,
            mtime: UNIX_EPOCH,
            ctime: UNIX_EPOCH,
        }
    }
}

#[cfg(unix)]
impl From<&Metadata> for FileStat {
    fn from(meta: &Metadata) -> FileStat {
        let rdev = meta.rdev();
        FileStat {
            mode: meta.mode(),
            nlink: u32::try_from(meta.nlink()).unwrap_or(u32::MAX),
            uid: meta.uid(),
            gid: meta.gid(),
            size: meta.size(),
            used: meta.blocks().saturating_mul(STAT_BLOCK_SIZE),
            rdev: (dev_major(rdev), dev_minor(rdev)),
            fsid: meta.dev(),
            fileid: meta.ino(),
            atime: meta.accessed().unwrap_or(UNIX_EPOCH),
            mtime: meta.modified().unwrap_or(UNIX_EPOCH),
            ctime: unix_time(meta.ctime(), meta.ctime_nsec()),
        }
    }
}

/// Major number of a Linux `dev_t`.
#[cfg(unix)]
fn dev_major(dev: u64) -> u32 {
    (((dev >> 32) & 0xffff_f000) | ((dev >> 8) & 0x0000_0fff)) as u32
}

/// Minor number of a Linux `dev_t`.
#[cfg(unix)]
fn dev_minor(dev: u64) -> u32 {
    (((dev >> 12) & 0xffff_ff00) | (dev & 0x0000_00ff)) as u32
}

#[cfg(unix)]
fn unix_time(seconds: i64, nanoseconds: i64) -> SystemTime {
    match (u64::try_from(seconds), u32::try_from(nanoseconds)) {
        (Ok(seconds), Ok(nanoseconds)) => UNIX_EPOCH + Duration::new(seconds, nanoseconds),
        _ => UNIX_EPOCH,
    }
}

impl ftype3 {
    /// File type encoded in the type bits of a Unix mode.
    pub fn from_mode(mode: u32) -> Option<ftype3> {
        match mode & S_IFMT {
            S_IFREG => Some(ftype3::NF3REG),
            S_IFDIR => Some(ftype3::NF3DIR),
            S_IFBLK => Some(ftype3::NF3BLK),
            S_IFCHR => Some(ftype3::NF3CHR),
            S_IFLNK => Some(ftype3::NF3LNK),
            S_IFSOCK => Some(ftype3::NF3SOCK),
            S_IFIFO => Some(ftype3::NF3FIFO),
            _ => None,
        }
    }
}

/// Times before the epoch clamp to zero, times past 2106 to `u32::MAX` seconds.
impl From<SystemTime> for nfstime3 {
    fn from(time: SystemTime) -> nfstime3 {
        match time.duration_since(UNIX_EPOCH) {
            Ok(since_epoch) => nfstime3 {
                seconds: u32::try_from(since_epoch.as_secs()).unwrap_or(u32::MAX),
                nseconds: since_epoch.subsec_nanos(),
            },
            Err(_) => nfstime3::default(),
        }
    }
}

impl From<nfstime3> for SystemTime {
    fn from(time: nfstime3) -> SystemTime {
        UNIX_EPOCH + Duration::new(time.seconds.into(), time.nseconds)
    }
}

impl From<nfstime3> for filetime::FileTime {
    fn from(time: nfstime3) -> Self {
        filetime::FileTime::from_unix_time(time.seconds as i64, time.nseconds)
    }
}

impl From<filetime::FileTime> for nfstime3 {
    fn from(time: filetime::FileTime) -> Self {
        nfstime3 {
            seconds: u32::try_from(time.unix_seconds()).unwrap_or_default(),
            nseconds: time.nanoseconds(),
        }
    }
}

impl set_time3 {
    /// Time a SETATTR asks for, or `None` if it should stay unchanged.
    pub fn to_file_time(&self) -> Option<filetime::FileTime> {
        match self {
            set_time3::DONT_CHANGE => None,
            set_time3::SET_TO_SERVER_TIME => Some(filetime::FileTime::now()),
            set_time3::SET_TO_CLIENT_TIME(time) => Some((*time).into()),
        }
    }
}

impl fattr3 {
    /// Builds wire attributes from backend metadata.
    ///
    /// A mode without recognizable type bits describes a regular file.
    pub fn create(stat: &FileStat) -> fattr3 {
        let ftype = ftype3::from_mode(stat.mode).unwrap_or_else(|| {
            debug!("mode {:o} carries no file type, assuming a regular file", stat.mode);
            ftype3::NF3REG
        });
        fattr3 {
            ftype,
            mode: stat.mode & PERMISSION_MASK,
            nlink: stat.nlink,
            uid: stat.uid,
            gid: stat.gid,
            size: stat.size,
            used: stat.used,
            rdev: specdata3 { specdata1: stat.rdev.0, specdata2: stat.rdev.1 },
            fsid: stat.fsid,
            fileid: stat.fileid,
            atime: stat.atime.into(),
            mtime: stat.mtime.into(),
            ctime: stat.ctime.into(),
        }
    }
}

impl From<&FileStat> for fattr3 {
    fn from(stat: &FileStat) -> fattr3 {
        fattr3::create(stat)
    }
}

impl From<&FileStat> for wcc_attr {
    fn from(stat: &FileStat) -> wcc_attr {
        wcc_attr { size: stat.size, mtime: stat.mtime.into(), ctime: stat.ctime.into() }
    }
}

impl From<&FileStat> for post_op_attr {
    fn from(stat: &FileStat) -> post_op_attr {
        post_op_attr::attributes(fattr3::create(stat))
    }
}

impl From<&FileStat> for pre_op_attr {
    fn from(stat: &FileStat) -> pre_op_attr {
        pre_op_attr::attributes(stat.into())
    }
}

impl wcc_data {
    /// Weak cache consistency data from the object state around an operation.
    /// A missing side is sent without attributes.
    pub fn new(before: Option<&FileStat>, after: Option<&FileStat>) -> wcc_data {
        wcc_data {
            before: before.map_or(pre_op_attr::Void, pre_op_attr::from),
            after: after.map_or(post_op_attr::Void, post_op_attr::from),
        }
    }
}

/// A place in a procedure result that holds the attributes of an object.
pub trait AttributeSlot {
    fn fill(&mut self, stat: &FileStat);
}

impl AttributeSlot for fattr3 {
    fn fill(&mut self, stat: &FileStat) {
        *self = fattr3::create(stat);
    }
}

impl AttributeSlot for post_op_attr {
    fn fill(&mut self, stat: &FileStat) {
        *self = stat.into();
    }
}

/// Fills the post-operation side; the pre-operation side is the caller's.
impl AttributeSlot for wcc_data {
    fn fill(&mut self, stat: &FileStat) {
        self.after = stat.into();
    }
}

macro_rules! with_attributes {
    ($t:ty { $($method:ident => $field:ident),+ $(,)? }) => {
        impl $t {
            $(
                pub fn $method(mut self, stat: &FileStat) -> Self {
                    AttributeSlot::fill(&mut self.$field, stat);
                    self
                }
            )+
        }
    };
}

with_attributes!(nfs3::GETATTR3resok { with_attributes => obj_attributes });
with_attributes!(nfs3::SETATTR3resok { with_attributes => obj_wcc });
with_attributes!(nfs3::SETATTR3resfail { with_attributes => obj_wcc });
with_attributes!(nfs3::ACCESS3resok { with_attributes => obj_attributes });
with_attributes!(nfs3::ACCESS3resfail { with_attributes => obj_attributes });
with_attributes!(dir::LOOKUP3resok {
    with_attributes => obj_attributes,
    with_dir_attributes => dir_attributes,
});
with_attributes!(dir::LOOKUP3resfail { with_dir_attributes => dir_attributes });
with_attributes!(file::READLINK3resok { with_attributes => symlink_attributes });
with_attributes!(file::READLINK3resfail { with_attributes => symlink_attributes });
with_attributes!(file::READ3resok { with_attributes => file_attributes });
with_attributes!(file::READ3resfail { with_attributes => file_attributes });
with_attributes!(file::WRITE3resok { with_attributes => file_wcc });
with_attributes!(file::WRITE3resfail { with_attributes => file_wcc });
with_attributes!(dir::CREATE3resok {
    with_attributes => obj_attributes,
    with_dir_attributes => dir_wcc,
});
with_attributes!(dir::CREATE3resfail { with_dir_attributes => dir_wcc });
with_attributes!(dir::REMOVE3resok { with_dir_attributes => dir_wcc });
with_attributes!(dir::RENAME3resok {
    with_from_dir_attributes => fromdir_wcc,
    with_to_dir_attributes => todir_wcc,
});
with_attributes!(file::LINK3resok {
    with_attributes => file_attributes,
    with_dir_attributes => linkdir_wcc,
});
with_attributes!(file::LINK3resfail {
    with_attributes => file_attributes,
    with_dir_attributes => linkdir_wcc,
});
with_attributes!(dir::READDIR3resok { with_dir_attributes => dir_attributes });
with_attributes!(dir::READDIR3resfail { with_dir_attributes => dir_attributes });
with_attributes!(dir::READDIRPLUS3resok { with_dir_attributes => dir_attributes });
with_attributes!(dir::entryplus3 { with_attributes => name_attributes });
with_attributes!(fs::FSSTAT3resok { with_attributes => obj_attributes });
with_attributes!(fs::FSSTAT3resfail { with_attributes => obj_attributes });
with_attributes!(fs::FSINFO3resok { with_attributes => obj_attributes });
with_attributes!(fs::PATHCONF3resok { with_attributes => obj_attributes });
with_attributes!(file::COMMIT3resok { with_attributes => file_wcc });
with_attributes!(file::COMMIT3resfail { with_attributes => file_wcc });

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use nfs_mamont_proto::fs_util::{FileStat, S_IFCHR, S_IFDIR, S_IFLNK, S_IFREG};
use nfs_mamont_proto::xdr::nfs3::{
    dir, fattr3, file, ftype3, nfstime3, post_op_attr, pre_op_attr, set_time3, wcc_data,
};
use nfs_mamont_proto::xdr::{to_bytes, Serialize};

fn be_u32(buf: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes(buf[offset..offset + 4].try_into().expect("4 bytes"))
}

fn be_u64(buf: &[u8], offset: usize) -> u64 {
    u64::from_be_bytes(buf[offset..offset + 8].try_into().expect("8 bytes"))
}

fn sample_stat() -> FileStat {
    FileStat {
        mode: S_IFCHR | 0o4755,
        nlink: 2,
        uid: 1000,
        gid: 100,
        size: 0x1_0000_0001,
        used: 4096,
        rdev: (8, 1),
        fsid: 0xdead_beef,
        fileid: 0x0102_0304_0506_0708,
        atime: UNIX_EPOCH + Duration::new(10, 11),
        mtime: UNIX_EPOCH + Duration::new(20, 21),
        ctime: UNIX_EPOCH + Duration::new(30, 31),
    }
}

#[test]
fn fattr3_wire_layout() {
    let attr = fattr3::create(&sample_stat());
    let buf = to_bytes(&attr).expect("cannot serialize");

    assert_eq!(buf.len(), fattr3::XDR_SIZE);
    assert_eq!(attr.packed_size(), 84);

    assert_eq!(be_u32(&buf, 0), 4); // NF3CHR
    assert_eq!(be_u32(&buf, 4), 0o4755);
    assert_eq!(be_u32(&buf, 8), 2);
    assert_eq!(be_u32(&buf, 12), 1000);
    assert_eq!(be_u32(&buf, 16), 100);
    assert_eq!(be_u64(&buf, 20), 0x1_0000_0001);
    assert_eq!(be_u64(&buf, 28), 4096);
    assert_eq!(be_u32(&buf, 36), 8);
    assert_eq!(be_u32(&buf, 40), 1);
    assert_eq!(be_u64(&buf, 44), 0xdead_beef);
    assert_eq!(be_u64(&buf, 52), 0x0102_0304_0506_0708);
    assert_eq!((be_u32(&buf, 60), be_u32(&buf, 64)), (10, 11));
    assert_eq!((be_u32(&buf, 68), be_u32(&buf, 72)), (20, 21));
    assert_eq!((be_u32(&buf, 76), be_u32(&buf, 80)), (30, 31));
}

#[test]
fn file_type_follows_mode() {
    assert_eq!(ftype3::from_mode(S_IFDIR | 0o755), Some(ftype3::NF3DIR));
    assert_eq!(ftype3::from_mode(S_IFLNK | 0o777), Some(ftype3::NF3LNK));
    assert_eq!(ftype3::from_mode(0o644), None);

    let dir = fattr3::create(&FileStat { mode: S_IFDIR | 0o755, ..Default::default() });
    assert_eq!(dir.ftype, ftype3::NF3DIR);
    assert_eq!(dir.mode, 0o755);

    // no type bits at all
    let plain = fattr3::create(&FileStat { mode: 0o600, ..Default::default() });
    assert_eq!(plain.ftype, ftype3::NF3REG);
    assert_eq!(plain.mode, 0o600);
}

#[test]
fn time_conversions() {
    let time = UNIX_EPOCH + Duration::new(1_700_000_000, 123_456_789);
    let nfs: nfstime3 = time.into();
    assert_eq!(nfs, nfstime3 { seconds: 1_700_000_000, nseconds: 123_456_789 });
    assert_eq!(SystemTime::from(nfs), time);

    let before_epoch = UNIX_EPOCH - Duration::from_secs(5);
    assert_eq!(nfstime3::from(before_epoch), nfstime3::default());

    let file_time = filetime::FileTime::from(nfs);
    assert_eq!(file_time.unix_seconds(), 1_700_000_000);
    assert_eq!(file_time.nanoseconds(), 123_456_789);
    assert_eq!(nfstime3::from(file_time), nfs);
}

#[test]
fn set_time_requests() {
    assert_eq!(set_time3::DONT_CHANGE.to_file_time(), None);
    assert!(set_time3::SET_TO_SERVER_TIME.to_file_time().is_some());

    let client = set_time3::SET_TO_CLIENT_TIME(nfstime3 { seconds: 42, nseconds: 7 });
    assert_eq!(client.to_file_time(), Some(filetime::FileTime::from_unix_time(42, 7)));
}

#[test]
fn weak_cache_consistency() {
    let stat = sample_stat();

    let wcc = wcc_data::new(Some(&stat), Some(&stat));
    let pre_op_attr::attributes(before) = wcc.before else {
        panic!("pre-operation attributes missing");
    };
    assert_eq!(before.size, stat.size);
    assert_eq!(before.mtime, nfstime3 { seconds: 20, nseconds: 21 });
    assert_eq!(wcc.after.as_attributes(), Some(&fattr3::create(&stat)));

    let empty = wcc_data::new(None, None);
    assert_eq!(empty, wcc_data::default());
    assert_eq!(to_bytes(&empty).expect("cannot serialize"), [0u8; 8]);
}

#[test]
fn result_builders_fill_attribute_slots() {
    let stat = FileStat { mode: S_IFREG | 0o644, size: 42, ..Default::default() };
    let dir_stat = FileStat { mode: S_IFDIR | 0o755, ..Default::default() };

    let lookup = dir::LOOKUP3resok::default().with_attributes(&stat).with_dir_attributes(&dir_stat);
    assert_eq!(lookup.obj_attributes.as_attributes().map(|a| a.size), Some(42));
    assert_eq!(lookup.dir_attributes.as_attributes().map(|a| a.ftype), Some(ftype3::NF3DIR));

    let write = file::WRITE3resok::default().with_attributes(&stat);
    assert_eq!(write.file_wcc.before, pre_op_attr::Void);
    assert_eq!(write.file_wcc.after, post_op_attr::from(&stat));
}

#[cfg(unix)]
#[test]
fn metadata_conversion() {
    let dir = std::env::temp_dir();
    let meta = std::fs::metadata(&dir).expect("temp dir metadata");
    let stat = FileStat::from(&meta);
    let attr = fattr3::create(&stat);

    assert_eq!(attr.ftype, ftype3::NF3DIR);
    assert_eq!(attr.mode & !0o7777, 0);
    assert_eq!(stat.size, meta.len());
}

//! XDR is a standard for the description and encoding of data.
//! It is useful for transferring data between different computer
//! architectures.
//!
//! <https://datatracker.ietf.org/doc/html/rfc1832>
//!
//! Its Rust-specific implementation is presented below.
//! Where appropriate, the standard types of the XDR language have
//! been replaced by similar types of the Rust language. For example,
//! the 32-bit `Integer` type was replaced by the `i32` type, and the
//! `opaque<>` type was replaced by `[u8]`.
//!
//! Every item is a multiple of four bytes long. Data shorter than that
//! is followed by zero bytes, and [`Serialize::packed_size`] always
//! includes them, so an encoder can size its buffer before writing.

use std::io::{Read, Write};

use byteorder::BigEndian;
use byteorder::{ReadBytesExt, WriteBytesExt};
use num_traits::{FromPrimitive, ToPrimitive};

pub mod nfs3;
pub mod rpc;
pub mod utils;

pub use utils::{byte_length, padding_len};

/// XDR assumes big endian encoding.
pub type XDREndian = BigEndian;

/// Upper bound on elements preallocated for a variable-length array.
/// Longer arrays still decode, they just grow while reading.
const PREALLOCATION_LIMIT: usize = 64;

pub trait Serialize {
    /// Serializes the implementing type to the provided writer.
    ///
    /// ## Parameters
    /// * `dest` - Where will the value be serialized to.
    ///
    /// ## Returns
    /// * `std::io::Result<()>` - Ok(()) on success, or an error if serialization fails.
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()>;

    /// Exact number of bytes [`Serialize::serialize`] writes, padding included.
    fn packed_size(&self) -> usize;
}

pub trait Deserialize {
    /// Deserializes data from the provided reader into the implementing type.
    ///
    /// ## Parameters
    /// * `src` - From where the value will be deserialized.
    ///
    /// ## Returns
    /// * `std::io::Result<()>` - Ok(()) on success, or an error if deserialization fails.
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()>;
}

/// Deserialization based on the [Default] trait of the type T.
///
/// # Parameters
/// * src - From where the value will be deserialized
///
/// # Returns
/// * `std::io::Result<T>` - decoded value, or an error if deserialization fails.
pub fn deserialize<T>(src: &mut impl Read) -> std::io::Result<T>
where
    T: Deserialize + Default,
{
    let mut val = T::default();
    val.deserialize(src)?;

    Ok(val)
}

/// Serializes `value` into a freshly allocated buffer of exactly
/// [`Serialize::packed_size`] bytes.
pub fn to_bytes<T: Serialize + ?Sized>(value: &T) -> std::io::Result<Vec<u8>> {
    let mut buffer = Vec::with_capacity(value.packed_size());
    value.serialize(&mut buffer)?;
    Ok(buffer)
}

/// Empty XDR `void` value: arguments and results of `NULL` procedures.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Void;

impl Serialize for Void {
    fn serialize<W: Write>(&self, _dest: &mut W) -> std::io::Result<()> {
        Ok(())
    }

    fn packed_size(&self) -> usize {
        0
    }
}

impl Deserialize for Void {
    fn deserialize<R: Read>(&mut self, _src: &mut R) -> std::io::Result<()> {
        Ok(())
    }
}

/// Serializes a C-like enum as an XDR `enum`, i.e. as a signed integer.
#[macro_export]
macro_rules! SerializeEnum {
    ($t:ident) => {
        impl $crate::protocol::xdr::Serialize for $t {
            fn serialize<W: ::std::io::Write>(&self, dest: &mut W) -> ::std::io::Result<()> {
                $crate::protocol::xdr::serialize_enum(self, dest)
            }

            fn packed_size(&self) -> usize {
                4
            }
        }
    };
}

/// Deserializes an XDR `enum`, rejecting discriminants the enum does not know.
#[macro_export]
macro_rules! DeserializeEnum {
    ($t:ident) => {
        impl $crate::protocol::xdr::Deserialize for $t {
            fn deserialize<R: ::std::io::Read>(&mut self, src: &mut R) -> ::std::io::Result<()> {
                *self = $crate::protocol::xdr::deserialize_enum(src)?;
                Ok(())
            }
        }
    };
}

#[doc(hidden)]
pub fn serialize_enum<T: ToPrimitive>(value: &T, dest: &mut impl Write) -> std::io::Result<()> {
    match value.to_i32() {
        Some(val) => dest.write_i32::<XDREndian>(val),
        None => Err(utils::invalid_data("Invalid enum value")),
    }
}

#[doc(hidden)]
pub fn deserialize_enum<T: FromPrimitive>(src: &mut impl Read) -> std::io::Result<T> {
    let val = src.read_i32::<XDREndian>()?;
    FromPrimitive::from_i32(val).ok_or_else(|| utils::invalid_data("Invalid enum value"))
}

/// XDR `bool` type serialization implementation.
///
/// ```text
/// bool identifier;
/// ```
///
/// This is equivalent to:
///
/// ```text
///  enum { FALSE = 0, TRUE = 1 } identifier;
/// ```
///
/// Thus, the `bool` type is serialized as an `enum`, i.e. in `i32`.
impl Serialize for bool {
    fn serialize<R: Write>(&self, dest: &mut R) -> std::io::Result<()> {
        dest.write_i32::<XDREndian>(if *self { 1 } else { 0 })
    }

    fn packed_size(&self) -> usize {
        4
    }
}

/// XDR `bool` type deserialization implementation.
///
/// Any value other than `0` or `1` is an error.
impl Deserialize for bool {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        match src.read_i32::<XDREndian>()? {
            0 => *self = false,
            1 => *self = true,
            _ => return Err(utils::invalid_data("Invalid value for bool enum")),
        }
        Ok(())
    }
}

macro_rules! xdr_integer {
    ($t:ty, $size:expr, $write:ident, $read:ident) => {
        impl Serialize for $t {
            fn serialize<R: Write>(&self, dest: &mut R) -> std::io::Result<()> {
                dest.$write::<XDREndian>(*self)
            }

            fn packed_size(&self) -> usize {
                $size
            }
        }

        impl Deserialize for $t {
            fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
                *self = src.$read::<XDREndian>()?;
                Ok(())
            }
        }
    };
}

// `int`, `hyper`, `unsigned int`, `unsigned hyper`, `float` and `double`.
xdr_integer!(i32, 4, write_i32, read_i32);
xdr_integer!(i64, 8, write_i64, read_i64);
xdr_integer!(u32, 4, write_u32, read_u32);
xdr_integer!(u64, 8, write_u64, read_u64);
xdr_integer!(f32, 4, write_f32, read_f32);
xdr_integer!(f64, 8, write_f64, read_f64);

/// XDR Fixed-Length Opaque Data serialization implementation.
///
/// ```text
/// opaque identifier[n];
/// ```
impl<const N: usize> Serialize for [u8; N] {
    fn serialize<R: Write>(&self, dest: &mut R) -> std::io::Result<()> {
        dest.write_all(self)?;
        utils::write_padding(N, dest)?;

        Ok(())
    }

    fn packed_size(&self) -> usize {
        N + utils::padding_len(N)
    }
}

/// XDR Fixed-Length Opaque Data deserialization implementation.
impl<const N: usize> Deserialize for [u8; N] {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        src.read_exact(self)?;
        utils::read_padding(N, src)?;

        Ok(())
    }
}

/// Object lengths in XDR are always serialized as [u32]. This wrapper
/// type provides a way to serialize the [usize] type common to Rust as [u32].
#[derive(Default)]
pub(crate) struct UsizeAsU32(pub(crate) usize);

/// Try to convert [usize] to [u32] and serialize.
impl Serialize for UsizeAsU32 {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        let Some(val) = self.0.to_u32() else {
            return Err(utils::invalid_input("cannot cast `usize` to `u32`"));
        };

        val.serialize(dest)
    }

    fn packed_size(&self) -> usize {
        4
    }
}

/// Try to deserialize [u32] and convert to [usize].
impl Deserialize for UsizeAsU32 {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        let Some(val) = deserialize::<u32>(src)?.to_usize() else {
            return Err(utils::invalid_data("cannot cast `u32` to `usize`"));
        };

        self.0 = val;
        Ok(())
    }
}

/// Reads exactly `length` opaque bytes into `dest`, followed by padding.
///
/// The buffer only grows as bytes actually arrive, so a forged length
/// prefix cannot force a large allocation.
pub(crate) fn read_opaque<R: Read>(
    length: usize,
    dest: &mut Vec<u8>,
    src: &mut R,
) -> std::io::Result<()> {
    dest.clear();
    let received = src.by_ref().take(length as u64).read_to_end(dest)?;
    if received != length {
        return Err(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "opaque data is shorter than its length prefix",
        ));
    }
    utils::read_padding(length, src)
}

/// XDR Variable-Length Opaque Data serialization implementation.
///
/// ```text
/// opaque identifier<m>;
/// ```
impl Serialize for [u8] {
    fn serialize<R: Write>(&self, dest: &mut R) -> std::io::Result<()> {
        UsizeAsU32(self.len()).serialize(dest)?;
        dest.write_all(self)?;
        utils::write_padding(self.len(), dest)?;

        Ok(())
    }

    fn packed_size(&self) -> usize {
        utils::byte_length(self.len())
    }
}

impl Serialize for Vec<u8> {
    fn serialize<R: Write>(&self, dest: &mut R) -> std::io::Result<()> {
        self.as_slice().serialize(dest)
    }

    fn packed_size(&self) -> usize {
        self.as_slice().packed_size()
    }
}

/// XDR Variable-Length Opaque Data deserialization implementation.
impl Deserialize for Vec<u8> {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        let length = deserialize::<UsizeAsU32>(src)?.0;
        read_opaque(length, self, src)
    }
}

/// XDR String serialization implementation.
impl Serialize for str {
    fn serialize<R: Write>(&self, dest: &mut R) -> std::io::Result<()> {
        self.as_bytes().serialize(dest)
    }

    fn packed_size(&self) -> usize {
        utils::byte_length(self.len())
    }
}

impl Serialize for String {
    fn serialize<R: Write>(&self, dest: &mut R) -> std::io::Result<()> {
        self.as_str().serialize(dest)
    }

    fn packed_size(&self) -> usize {
        self.as_str().packed_size()
    }
}

/// XDR String deserialization implementation.
///
/// Bytes that are not valid UTF-8 fail with [`std::io::ErrorKind::InvalidData`]
/// and leave the string empty.
impl Deserialize for String {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        self.clear();
        let bytes = deserialize::<Vec<u8>>(src)?;
        *self = String::from_utf8(bytes).map_err(|_| utils::invalid_data("Not UTF-8 string"))?;

        Ok(())
    }
}

/// XDR Fixed-Length Array serialization implementation.
///
/// ```text
/// type-name identifier[n];
/// ```
impl<const N: usize, T: Serialize> Serialize for [T; N] {
    fn serialize<R: Write>(&self, dest: &mut R) -> std::io::Result<()> {
        for i in self {
            i.serialize(dest)?;
        }

        Ok(())
    }

    fn packed_size(&self) -> usize {
        self.iter().map(Serialize::packed_size).sum()
    }
}

/// XDR Fixed-Length Array deserialization implementation.
impl<const N: usize, T: Deserialize> Deserialize for [T; N] {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        for i in self {
            i.deserialize(src)?;
        }

        Ok(())
    }
}

/// XDR Variable-Length Array serialization implementation.
///
/// Serialized as a 4-byte length prefix followed by that many elements.
impl<T: Serialize> Serialize for [T] {
    fn serialize<R: Write>(&self, dest: &mut R) -> std::io::Result<()> {
        UsizeAsU32(self.len()).serialize(dest)?;
        for i in self {
            i.serialize(dest)?;
        }

        Ok(())
    }

    fn packed_size(&self) -> usize {
        4 + self.iter().map(Serialize::packed_size).sum::<usize>()
    }
}

impl<T: Serialize> Serialize for Vec<T> {
    fn serialize<R: Write>(&self, dest: &mut R) -> std::io::Result<()> {
        self.as_slice().serialize(dest)
    }

    fn packed_size(&self) -> usize {
        self.as_slice().packed_size()
    }
}

impl<T: Deserialize + Default> Deserialize for Vec<T> {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        let length = deserialize::<UsizeAsU32>(src)?.0;
        self.clear();
        self.reserve(length.min(PREALLOCATION_LIMIT));
        for _ in 0..length {
            self.push(deserialize::<T>(src)?);
        }
        Ok(())
    }
}

/// Macro for implementing XDR serialization for structs.
///
/// This macro simplifies implementation of the XDR trait for struct types
/// by serializing each field in sequence. The packed size is the sum
/// of the field sizes.
#[allow(non_camel_case_types)]
#[macro_export]
macro_rules! SerializeStruct {
    (
        $t:ident,
        $($element:ident),*
    ) => {
        impl $crate::protocol::xdr::Serialize for $t {
            fn serialize<R: ::std::io::Write>(&self, dest: &mut R) -> ::std::io::Result<()> {
                $($crate::protocol::xdr::Serialize::serialize(&self.$element, dest)?;)*
                Ok(())
            }

            fn packed_size(&self) -> usize {
                0 $(+ $crate::protocol::xdr::Serialize::packed_size(&self.$element))*
            }
        }
    };
}

#[allow(non_camel_case_types)]
#[macro_export]
macro_rules! DeserializeStruct {
    (
        $t:ident,
        $($element:ident),*
    ) => {
        impl $crate::protocol::xdr::Deserialize for $t {
            fn deserialize<R: ::std::io::Read>(&mut self, src: &mut R) -> ::std::io::Result<()> {
                $($crate::protocol::xdr::Deserialize::deserialize(&mut self.$element, src)?;)*
                Ok(())
            }
        }
    };
}

/// Serializes a two-armed enum `{ Void, $variant($inner) }` as an XDR
/// union switched on `bool`.
#[allow(non_camel_case_types)]
#[macro_export]
macro_rules! SerializeBoolUnion {
    ($t:ident, $variant:ident, $inner:ty) => {
        impl $crate::protocol::xdr::Serialize for $t {
            fn serialize<W: ::std::io::Write>(&self, dest: &mut W) -> ::std::io::Result<()> {
                match self {
                    $t::Void => $crate::protocol::xdr::Serialize::serialize(&false, dest),
                    $t::$variant(inner) => {
                        $crate::protocol::xdr::Serialize::serialize(&true, dest)?;
                        $crate::protocol::xdr::Serialize::serialize(inner, dest)
                    }
                }
            }

            fn packed_size(&self) -> usize {
                match self {
                    $t::Void => 4,
                    $t::$variant(inner) => 4 + $crate::protocol::xdr::Serialize::packed_size(inner),
                }
            }
        }
    };
}

#[allow(non_camel_case_types)]
#[macro_export]
macro_rules! DeserializeBoolUnion {
    ($t:ident, $variant:ident, $inner:ty) => {
        impl $crate::protocol::xdr::Deserialize for $t {
            fn deserialize<R: ::std::io::Read>(&mut self, src: &mut R) -> ::std::io::Result<()> {
                *self = if $crate::protocol::xdr::deserialize::<bool>(src)? {
                    $t::$variant($crate::protocol::xdr::deserialize::<$inner>(src)?)
                } else {
                    $t::Void
                };
                Ok(())
            }
        }
    };
}

// XDR Optional-Data serialization implementation.
impl<T: Serialize> Serialize for Option<T> {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        match self {
            Some(data) => {
                true.serialize(dest)?;
                data.serialize(dest)?;

                Ok(())
            }
            None => false.serialize(dest),
        }
    }

    fn packed_size(&self) -> usize {
        4 + self.as_ref().map_or(0, Serialize::packed_size)
    }
}

// XDR Optional-Data deserialization implementation.
impl<T: Deserialize + Default> Deserialize for Option<T> {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        if deserialize::<bool>(src)? {
            *self = Some(deserialize::<T>(src)?);
        } else {
            *self = None;
        }

        Ok(())
    }
}

/// Writes `items` as an XDR linked list: every element is preceded by
/// `TRUE` and the list is closed with `FALSE`.
pub fn serialize_list<T: Serialize, W: Write>(items: &[T], dest: &mut W) -> std::io::Result<()> {
    for item in items {
        true.serialize(dest)?;
        item.serialize(dest)?;
    }
    false.serialize(dest)
}

/// Wire size of a list written by [`serialize_list`].
pub fn list_packed_size<T: Serialize>(items: &[T]) -> usize {
    4 + items.iter().map(|item| 4 + item.packed_size()).sum::<usize>()
}

/// Reads an XDR linked list written by [`serialize_list`].
pub fn deserialize_list<T, R>(src: &mut R) -> std::io::Result<Vec<T>>
where
    T: Deserialize + Default,
    R: Read,
{
    let mut items = Vec::new();
    while deserialize::<bool>(src)? {
        items.push(deserialize::<T>(src)?);
    }
    Ok(items)
}

// Re-export public types for use in other modules
pub use crate::DeserializeBoolUnion;
pub use crate::DeserializeEnum;
pub use crate::DeserializeStruct;
pub use crate::SerializeBoolUnion;
pub use crate::SerializeEnum;
pub use crate::SerializeStruct;

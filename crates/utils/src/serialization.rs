// Copyright 2024-2025 Irreducible Inc.

//! Length-prefixed little-endian byte encodings for coefficients and coefficient sequences.
//!
//! Fixed-width integers are written as their little-endian two's-complement bytes. Arbitrary
//! precision integers and sequences are prefixed with their length as a `u64`.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use num_bigint::BigInt;

use crate::ensure;

#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
	#[error("Write buffer is full")]
	WriteBufferFull,
	#[error("Not enough data in read buffer to deserialize")]
	NotEnoughBytes,
	#[error("Encoded length {0} does not fit in usize")]
	LengthOverflow(u64),
	#[error("{0} trailing bytes after deserialization")]
	TrailingBytes(usize),
}

/// Represents type that can be serialized to a byte buffer.
pub trait SerializeBytes {
	fn serialize(&self, write_buf: impl BufMut) -> Result<(), Error>;
}

/// Represents type that can be deserialized from a byte buffer.
pub trait DeserializeBytes {
	fn deserialize(read_buf: impl Buf) -> Result<Self, Error>
	where
		Self: Sized;
}

macro_rules! impl_serialize_int {
	($($ty:ty => $put:ident, $get:ident);* $(;)?) => {
		$(
			impl SerializeBytes for $ty {
				fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), Error> {
					ensure!(write_buf.remaining_mut() >= ::std::mem::size_of::<$ty>(), Error::WriteBufferFull);
					write_buf.$put(*self);
					Ok(())
				}
			}

			impl DeserializeBytes for $ty {
				fn deserialize(mut read_buf: impl Buf) -> Result<Self, Error> {
					ensure!(read_buf.remaining() >= ::std::mem::size_of::<$ty>(), Error::NotEnoughBytes);
					Ok(read_buf.$get())
				}
			}
		)*
	};
}

impl_serialize_int! {
	i32 => put_i32_le, get_i32_le;
	i64 => put_i64_le, get_i64_le;
	i128 => put_i128_le, get_i128_le;
	u64 => put_u64_le, get_u64_le;
}

/// Writes a collection length as a little-endian `u64`.
pub fn serialize_len(len: usize, write_buf: impl BufMut) -> Result<(), Error> {
	(len as u64).serialize(write_buf)
}

/// Reads a collection length written by [`serialize_len`].
pub fn deserialize_len(read_buf: impl Buf) -> Result<usize, Error> {
	let len = u64::deserialize(read_buf)?;
	usize::try_from(len).map_err(|_| Error::LengthOverflow(len))
}

impl SerializeBytes for BigInt {
	fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), Error> {
		let bytes = self.to_signed_bytes_le();
		serialize_len(bytes.len(), &mut write_buf)?;
		ensure!(write_buf.remaining_mut() >= bytes.len(), Error::WriteBufferFull);
		write_buf.put_slice(&bytes);
		Ok(())
	}
}

impl DeserializeBytes for BigInt {
	fn deserialize(mut read_buf: impl Buf) -> Result<Self, Error> {
		let len = deserialize_len(&mut read_buf)?;
		ensure!(read_buf.remaining() >= len, Error::NotEnoughBytes);
		let bytes = read_buf.copy_to_bytes(len);
		Ok(BigInt::from_signed_bytes_le(&bytes))
	}
}

impl<T: SerializeBytes> SerializeBytes for [T] {
	fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), Error> {
		serialize_len(self.len(), &mut write_buf)?;
		for item in self {
			item.serialize(&mut write_buf)?;
		}
		Ok(())
	}
}

impl<T: SerializeBytes> SerializeBytes for Vec<T> {
	fn serialize(&self, write_buf: impl BufMut) -> Result<(), Error> {
		self.as_slice().serialize(write_buf)
	}
}

impl<T: DeserializeBytes> DeserializeBytes for Vec<T> {
	fn deserialize(mut read_buf: impl Buf) -> Result<Self, Error> {
		let len = deserialize_len(&mut read_buf)?;
		// Every element takes at least one byte, so a corrupt length cannot force a huge allocation.
		let mut items = Vec::with_capacity(len.min(read_buf.remaining()));
		for _ in 0..len {
			items.push(T::deserialize(&mut read_buf)?);
		}
		Ok(items)
	}
}

/// Encodes `value` into a freshly allocated, immutable byte buffer.
pub fn to_bytes<T: SerializeBytes + ?Sized>(value: &T) -> Result<Bytes, Error> {
	let mut buf = BytesMut::new();
	value.serialize(&mut buf)?;
	Ok(buf.freeze())
}

/// Decodes a value that must occupy the whole of `bytes`.
pub fn from_bytes<T: DeserializeBytes>(mut bytes: &[u8]) -> Result<T, Error> {
	let value = T::deserialize(&mut bytes)?;
	ensure!(bytes.is_empty(), Error::TrailingBytes(bytes.len()));
	Ok(value)
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;
	use rand::{rngs::StdRng, Rng, SeedableRng};

	use super::*;

	#[test]
	fn test_i64_sequence_serialize_deserialize() {
		let mut rng = StdRng::seed_from_u64(0);
		let data = (0..37).map(|_| rng.gen::<i64>()).collect::<Vec<_>>();

		let bytes = to_bytes(&data).unwrap();
		assert_eq!(bytes.len(), 8 + 37 * 8);
		assert_eq!(from_bytes::<Vec<i64>>(&bytes).unwrap(), data);
	}

	#[test]
	fn test_bigint_sign_and_magnitude_survive() {
		let data = vec![
			BigInt::from(0),
			BigInt::from(-1),
			BigInt::from(i64::MIN) * BigInt::from(i64::MAX),
			BigInt::parse_bytes(b"123456789012345678901234567890", 10).unwrap(),
		];

		let bytes = to_bytes(&data).unwrap();
		assert_eq!(from_bytes::<Vec<BigInt>>(&bytes).unwrap(), data);
	}

	#[test]
	fn test_empty_sequence_is_only_a_length_prefix() {
		let bytes = to_bytes(&Vec::<i64>::new()).unwrap();
		assert_eq!(&bytes[..], &[0u8; 8]);
		assert!(from_bytes::<Vec<i64>>(&bytes).unwrap().is_empty());
	}

	#[test]
	fn test_truncated_payload_is_rejected() {
		let bytes = to_bytes(&vec![1i64, 2, 3]).unwrap();
		assert_matches!(
			from_bytes::<Vec<i64>>(&bytes[..bytes.len() - 1]),
			Err(Error::NotEnoughBytes)
		);
		assert_matches!(from_bytes::<Vec<i64>>(&bytes[..4]), Err(Error::NotEnoughBytes));
	}

	#[test]
	fn test_trailing_bytes_are_rejected() {
		let mut bytes = to_bytes(&vec![7i32]).unwrap().to_vec();
		bytes.push(0);
		assert_matches!(from_bytes::<Vec<i32>>(&bytes), Err(Error::TrailingBytes(1)));
	}

	#[test]
	fn test_fixed_buffer_overflow() {
		let mut storage = [0u8; 4];
		let mut buf = &mut storage[..];
		assert_matches!(5i64.serialize(&mut buf), Err(Error::WriteBufferFull));
	}
}

/// Serialization format options for built transformations.
///
/// Each format has both compressed (Lz4) and uncompressed variants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SerializationFormat {
    /// bincode format - compact binary
    Bincode,
    /// bincode format with LZ4 compression (default, best balance of size and speed)
    #[default]
    BincodeLz4,
}

impl SerializationFormat {
    /// Returns true if this format uses LZ4 compression
    pub fn is_compressed(&self) -> bool {
        matches!(self, SerializationFormat::BincodeLz4)
    }
}

use crate::errors::TrafoError;
use serde::{de::DeserializeOwned, Serialize};

/// Serialize data to bytes using the specified format.
/// Applies LZ4 compression if the format variant ends with Lz4.
pub fn serialize<T: Serialize>(data: &T, format: SerializationFormat) -> Result<Vec<u8>, TrafoError> {
    let bytes = bincode::serde::encode_to_vec(data, bincode::config::standard())
        .map_err(|_| TrafoError::SerializationFailed)?;
    if format.is_compressed() {
        Ok(lz4_flex::compress_prepend_size(&bytes))
    } else {
        Ok(bytes)
    }
}

/// Deserialize data from bytes using the specified format.
/// Applies LZ4 decompression if the format variant ends with Lz4.
pub fn deserialize<T: DeserializeOwned>(data: &[u8], format: SerializationFormat) -> Result<T, TrafoError> {
    let decompressed;
    let bytes = if format.is_compressed() {
        decompressed = lz4_flex::decompress_size_prepended(data)
            .map_err(|_| TrafoError::LZ4DecompressionFailed)?;
        &decompressed[..]
    } else {
        data
    };
    bincode::serde::decode_from_slice(bytes, bincode::config::standard())
        .map(|(value, _)| value)
        .map_err(|_| TrafoError::DeserializationFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::trafo_dict::{NodePair, TrafoDict};
    use ndarray::array;

    #[test]
    fn test_bincode_roundtrip() {
        let dict: TrafoDict = [(NodePair::new(0, 0), array![[1.0, 0.0], [-0.5, 0.5]]), (NodePair::new(0, 1), array![[0.25, 2.0]])]
            .into_iter().collect();

        let bytes = serialize(&dict, SerializationFormat::Bincode).unwrap();
        let result: TrafoDict = deserialize(&bytes, SerializationFormat::Bincode).unwrap();
        assert_eq!(dict, result);
        assert!(result.keys().copied().eq([NodePair::new(0, 0), NodePair::new(0, 1)]));
    }

    #[test]
    fn test_bincode_lz4_roundtrip() {
        let values: Vec<f64> = (0..64).map(|i| i as f64 * 0.5).collect();

        let bytes = serialize(&values, SerializationFormat::BincodeLz4).unwrap();
        let result: Vec<f64> = deserialize(&bytes, SerializationFormat::BincodeLz4).unwrap();
        assert_eq!(values, result);
    }

    #[test]
    fn test_corrupt_buffer() {
        let result: Result<Vec<f64>, _> = deserialize(&[1, 2, 3], SerializationFormat::BincodeLz4);
        assert_eq!(result, Err(TrafoError::LZ4DecompressionFailed));
    }
}

/// (De)Serialize a [f64] rounded to 3 decimal places
pub mod f64_dp3 {
    use serde::{Deserialize, Serialize};
    use serde::{Deserializer, Serializer};

    /// Serialize a [f64] rounded to 3 decimal places
    pub fn serialize<S: Serializer>(v: &f64, s: S) -> Result<S::Ok, S::Error> {
        const D: f64 = (10_u32.pow(3)) as f64;
        ((v * D).round() / D).serialize(s)
    }

    /// Deserialize a [f64]
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        f64::deserialize(d)
    }
}

/// (De)Serialize bytes with base64 encoding
pub mod sliceu8_base64 {
    use base64::Engine;
    use serde::{Deserialize, Serialize};
    use serde::{Deserializer, Serializer};

    /// Serialize bytes as base64 encoded
    pub fn serialize<S: Serializer>(v: impl AsRef<[u8]>, s: S) -> Result<S::Ok, S::Error> {
        String::serialize(&base64::engine::general_purpose::STANDARD.encode(v), s)
    }

    /// Deserialize base64 encoded bytes
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        use serde::de::Error;

        String::deserialize(d).and_then(|s| {
            base64::engine::general_purpose::STANDARD
                .decode(s)
                .map_err(|e| D::Error::custom(format!("decoding base64 string failed, Err: {e:?}")))
        })
    }
}

/// (De)Serialize a [`std::sync::Arc<Vec<u8>>`] with base64 encoding
pub mod arc_vecu8_base64 {
    use serde::{Deserializer, Serializer};
    use std::sync::Arc;

    /// Serialize a [`Arc<Vec<u8>>`] as base64 encoded
    pub fn serialize<S: Serializer>(v: &Arc<Vec<u8>>, s: S) -> Result<S::Ok, S::Error> {
        super::sliceu8_base64::serialize(v.as_slice(), s)
    }

    /// Deserialize base64 encoded [`Arc<Vec<u8>>`]
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Arc<Vec<u8>>, D::Error> {
        super::sliceu8_base64::deserialize(d).map(Arc::new)
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use std::sync::Arc;

    #[derive(Debug, Serialize, Deserialize)]
    struct Pixels {
        #[serde(with = "super::arc_vecu8_base64")]
        data: Arc<Vec<u8>>,
    }

    #[test]
    fn bytes_base64_roundtrip() {
        let pixels = Pixels {
            data: Arc::new(vec![0x00, 0x7f, 0xff, 0x10]),
        };

        let json = serde_json::to_string(&pixels).unwrap();
        let back: Pixels = serde_json::from_str(&json).unwrap();

        assert_eq!(*back.data, *pixels.data);
    }

    #[test]
    fn f64_rounded_to_3_decimal_places() {
        #[derive(Debug, Serialize, Deserialize)]
        struct V {
            #[serde(with = "super::f64_dp3")]
            v: f64,
        }

        let json = serde_json::to_string(&V { v: 0.123456 }).unwrap();
        assert_eq!(json, r#"{"v":0.123}"#);
    }
}

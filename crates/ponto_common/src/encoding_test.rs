#[cfg(test)]
mod tests {
    use crate::encoding::{decode_base64url, encode_base64url, DecodeError};
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use proptest::prelude::*;

    #[test]
    fn test_decode_short_unpadded_key() {
        let bytes = decode_base64url("FgQ").expect("valid input");
        assert_eq!(bytes, vec![0x16, 0x04]);
    }

    #[test]
    fn test_decode_accepts_explicit_padding() {
        let bytes = decode_base64url("FgQ=").expect("valid input");
        assert_eq!(bytes, vec![0x16, 0x04]);
    }

    #[test]
    fn test_decode_maps_url_safe_alphabet() {
        // 0xfb 0xff encodes to "-_8" in base64url and "+/8=" in standard base64
        assert_eq!(decode_base64url("-_8").expect("url-safe"), vec![0xfb, 0xff]);
        assert_eq!(decode_base64url("+/8=").expect("standard"), vec![0xfb, 0xff]);
    }

    #[test]
    fn test_decode_vapid_sized_key() {
        let key = "BEl62iUYgUivxIkv69yViEuiBIa-Ib9-SkvMeAtA3LFgDzkrxZJjSgSnfckjBJuBkr3qBUYIHBQFLXYp5Nksh8U";
        let bytes = decode_base64url(key).expect("valid VAPID key");
        // uncompressed P-256 point
        assert_eq!(bytes.len(), 65);
        assert_eq!(bytes[0], 0x04);
    }

    #[test]
    fn test_decode_rejects_empty_and_garbage() {
        assert!(matches!(decode_base64url(""), Err(DecodeError::Empty)));
        assert!(matches!(decode_base64url("   "), Err(DecodeError::Empty)));
        assert!(matches!(
            decode_base64url("not*base64"),
            Err(DecodeError::Invalid(_))
        ));
    }

    #[test]
    fn test_encode_is_unpadded_url_safe() {
        assert_eq!(encode_base64url(&[0xfb, 0xff]), "-_8");
        assert_eq!(encode_base64url(&[0x16, 0x04]), "FgQ");
    }

    proptest! {
        // Both alphabets must decode to the same bytes
        #[test]
        fn test_decode_agrees_with_standard_base64(bytes in proptest::collection::vec(any::<u8>(), 1..96)) {
            let standard = STANDARD.encode(&bytes);
            let url_safe = encode_base64url(&bytes);

            prop_assert_eq!(decode_base64url(&standard).unwrap(), bytes.clone());
            prop_assert_eq!(decode_base64url(&url_safe).unwrap(), bytes);
        }
    }
}

//! Transfer encoding for profile images.

use crate::domain::ImageFile;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Image bytes as base64 plus the file extension, ready for a request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub base64: String,
    /// Lowercased, without the dot. Empty when the file name has none.
    pub extension: String,
}

impl EncodedImage {
    /// `data:image/{ext};base64,...`
    pub fn data_url(&self) -> String {
        format!("data:image/{};base64,{}", self.extension, self.base64)
    }
}

pub fn encode_image(file: &ImageFile) -> EncodedImage {
    let extension = file
        .name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    EncodedImage {
        base64: STANDARD.encode(&file.bytes),
        extension,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_image() {
        let encoded = encode_image(&ImageFile::new("avatar.PNG", b"hi!".to_vec()));
        assert_eq!(encoded.base64, "aGkh");
        assert_eq!(encoded.extension, "png");
        assert_eq!(encoded.data_url(), "data:image/png;base64,aGkh");
    }

    #[test]
    fn test_missing_extension() {
        let encoded = encode_image(&ImageFile::new("avatar", vec![]));
        assert_eq!(encoded.extension, "");
        assert_eq!(encoded.base64, "");
    }
}

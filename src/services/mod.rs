pub mod translate;
pub mod vision;

pub use translate::GoogleTranslateClient;
pub use vision::AzureVisionClient;

use crate::detection::RawDetectedObject;
use crate::error::{ServiceCallFailure, TranslationFailure};

/// Remote object detection and tagging. Calls block until the service answers
/// or the client's timeout fires.
pub trait VisionService {
    fn detect_objects(&self, image: &[u8]) -> Result<Vec<RawDetectedObject>, ServiceCallFailure>;

    fn estimate_tags(&self, image: &[u8], language: &str) -> Result<Vec<String>, ServiceCallFailure>;
}

pub trait Translator {
    fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslationFailure>;
}

impl<F> Translator for F
where
    F: Fn(&str, &str) -> Result<String, TranslationFailure>,
{
    fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslationFailure> {
        self(text, target_language)
    }
}

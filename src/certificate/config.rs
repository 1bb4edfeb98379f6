use crate::tools::env_args::retrieve_arg_value;
use derive_getters::Getters;
use std::path::PathBuf;

const MEDIA_ROOT_ARG: &str = "--media-root";
const DEFAULT_MEDIA_ROOT: &str = "media";

/// Where generated files are stored.
#[derive(Debug, Getters, Clone, PartialEq)]
pub struct CertificateConfig {
    media_root: PathBuf,
}

impl CertificateConfig {
    pub fn new(media_root: PathBuf) -> Self {
        Self { media_root }
    }

    pub fn from_args() -> Self {
        let media_root = retrieve_arg_value(MEDIA_ROOT_ARG)
            .filter(|media_root| !media_root.is_empty())
            .unwrap_or_else(|| DEFAULT_MEDIA_ROOT.to_owned());
        Self::new(PathBuf::from(media_root))
    }
}

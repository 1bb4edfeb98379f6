use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CertificateError {
    #[error("The certificates folder can't be created.")]
    CantCreateFolder,
    #[error("The certificate can't be written.")]
    CantWriteFile,
    #[error("The certificate can't be read.")]
    CantReadFile,
    #[error("A font can't be loaded.")]
    CantLoadFont,
    #[error("The certificate can't be rendered.")]
    CantRenderDocument,
}

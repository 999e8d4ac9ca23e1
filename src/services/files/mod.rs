mod service;
mod types;
mod validation;


pub use service::{FileService, FileServiceImpl};
pub use types::{FileDeleteResponse, FileObject, FilePurpose, FileUploadRequest};
pub use validation::FileRequestValidator;

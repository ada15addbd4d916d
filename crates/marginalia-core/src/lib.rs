pub mod annotation;
pub mod privacy;
pub mod sanitize;
pub mod share_url;

pub use annotation::{
    AnnotationContent, AnnotationEdit, InvalidAnnotationPayload, NewAnnotation, Selector,
};
pub use privacy::{PrivacyLevel, ShareIntent};
pub use sanitize::unescape_markdown_delimiters;
pub use share_url::ShareLinkBuilder;

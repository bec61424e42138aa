//! HTML pages served by the site.
//!
//! Pages are askama templates under `templates/`, compiled into the binary;
//! dynamic values are escaped when rendered.

pub mod footer;
pub mod home;
pub mod map_page;

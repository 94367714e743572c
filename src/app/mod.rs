//! 应用层：驱动 kernel 与宿主之间的一次次查询

mod session;

pub use session::Session;

//! 基础设施层：日志与记录存储

pub mod logger;
pub mod storage;

// 观影记录后端库
//
// 本库提供观影/待看记录的核心功能，包括：
// - API 路由与请求/响应编解码
// - 数据库操作
// - 配置加载

pub mod api;
pub mod config;
pub mod database;
pub mod models;

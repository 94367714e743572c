//! gotodoc - 根据光标所在的语法 scope 查找文档
//!
//! 模块结构：
//! - kernel: 纯状态核心（Action -> Store -> Effect），scope 表、模板、输出面板
//! - kernel::services: ports（契约）+ adapters（进程、配置、宿主）
//! - app: Session，把 effect 交给宿主并回收异步命令结果

pub mod app;
pub mod kernel;

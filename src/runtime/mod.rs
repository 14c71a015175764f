//! 进程生命周期：启动前准备与优雅退出

pub mod lifetime;

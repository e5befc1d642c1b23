//! 生成式语言后端实现

mod gemini;

pub use gemini::GeminiBackend;

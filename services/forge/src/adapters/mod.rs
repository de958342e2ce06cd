pub mod db;
pub mod page_llm;

pub use db::DbAdapter;
pub use page_llm::OpenAiPageAdapter;

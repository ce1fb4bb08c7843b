//! Query builders for rosterql

pub(crate) mod condition;
pub(crate) mod delete;
pub(crate) mod insert;
pub(crate) mod page;
pub(crate) mod select;
pub(crate) mod update;

pub use condition::Condition;
pub use condition::Order;
pub use condition::OrderBy;
pub use delete::Delete;
pub use insert::Insert;
pub use insert::InsertMany;
pub use page::Page;
pub use page::PageRequest;
pub use select::Select;
pub use update::Update;

mod memory;
mod storage;

pub use memory::MemoryConversationStore;
pub use storage::ConversationStore;

/// Storage backend for the current-conversation pointer.
///
/// Injected into the tool adapter so the host controls lifetime and
/// isolation; nothing here survives a process restart.
pub trait ConversationStore: Send + Sync {
    /// The most recently started conversation, if any.
    fn current(&self) -> Option<String>;

    /// Record `id` as the current conversation, replacing any previous one.
    fn set_current(&self, id: &str);
}

/// External human-response channel consulted when a clarification
/// question is raised mid-run.
pub trait HumanResponder {
    fn answer(&self, question: &str) -> String;
}

pub const DEFAULT_SCRIPTED_REPLY: &str =
    "Customer confirmed the details already provided in the ticket.";

/// Stand-in for a real human channel: always answers with one scripted
/// reply. Production deployments substitute their own [`HumanResponder`].
#[derive(Debug, Clone)]
pub struct ScriptedHumanResponder {
    reply: String,
}

impl ScriptedHumanResponder {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

impl Default for ScriptedHumanResponder {
    fn default() -> Self {
        Self::new(DEFAULT_SCRIPTED_REPLY)
    }
}

impl HumanResponder for ScriptedHumanResponder {
    fn answer(&self, _question: &str) -> String {
        self.reply.clone()
    }
}

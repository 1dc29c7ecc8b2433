//! In-process command registry.
//!
//! Named actions with optional keybinding and slash-invocation strings; the
//! shell's palette and hotkey layer resolve user input against it. Purely an
//! in-process registration call, no wire format.

/// A registered named action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub id: String,
    pub title: String,
    pub keybind: Option<String>,
    pub slash: Option<String>,
}

impl Command {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            keybind: None,
            slash: None,
        }
    }

    pub fn keybind(mut self, keybind: impl Into<String>) -> Self {
        self.keybind = Some(keybind.into());
        self
    }

    pub fn slash(mut self, slash: impl Into<String>) -> Self {
        self.slash = Some(slash.into());
        self
    }
}

#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: Vec<Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command. Re-registering an id replaces the old entry.
    pub fn register(&mut self, command: Command) {
        if let Some(existing) = self.commands.iter_mut().find(|c| c.id == command.id) {
            *existing = command;
        } else {
            self.commands.push(command);
        }
    }

    pub fn by_id(&self, id: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.id == id)
    }

    pub fn by_slash(&self, slash: &str) -> Option<&Command> {
        self.commands
            .iter()
            .find(|c| c.slash.as_deref() == Some(slash))
    }

    pub fn by_keybind(&self, keybind: &str) -> Option<&Command> {
        self.commands
            .iter()
            .find(|c| c.keybind.as_deref() == Some(keybind))
    }

    pub fn all(&self) -> &[Command] {
        &self.commands
    }
}

/// Commands this subsystem contributes to the shared registry.
pub fn register_chat_commands(registry: &mut CommandRegistry) {
    registry.register(
        Command::new("cadence.chat.new", "New conversation")
            .keybind("mod+n")
            .slash("chat"),
    );
    registry.register(
        Command::new("cadence.search", "Search conversations")
            .keybind("mod+shift+f")
            .slash("find"),
    );
    registry.register(
        Command::new("cadence.settings", "Open settings")
            .keybind("mod+comma")
            .slash("settings"),
    );
}

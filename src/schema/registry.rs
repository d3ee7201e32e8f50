//! Built-in command set of the record keeper.

use super::{ArgId, ArgSlot, CommandSpec, Constraint, SchemaError};

/// Slot ids used by the built-in commands.
pub mod slots {
    use super::ArgId;

    pub const NAME: ArgId = ArgId::new(1);
    pub const PHONE: ArgId = ArgId::new(2);
    pub const EMAIL: ArgId = ArgId::new(3);
    pub const ADDRESS: ArgId = ArgId::new(4);
    pub const TAG: ArgId = ArgId::new(5);
    pub const INDEX: ArgId = ArgId::new(6);
    pub const COMPANY: ArgId = ArgId::new(7);
    pub const ROLE: ArgId = ArgId::new(8);
    pub const STATUS: ArgId = ArgId::new(9);
    pub const DEADLINE: ArgId = ArgId::new(10);
    pub const KEYWORD: ArgId = ArgId::new(11);
}

/// All commands the front-end understands, in help/display order.
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    commands: Vec<CommandSpec>,
}

impl CommandRegistry {
    /// Empty registry; mostly useful in tests.
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// The record keeper's built-in command set.
    pub fn builtin() -> Result<Self, SchemaError> {
        use slots::*;

        let mut registry = Self::new();

        registry.register(
            CommandSpec::new("add", "Add a contact")
                .with_slot(ArgSlot::new(NAME, "n/", "name"))
                .with_slot(ArgSlot::new(PHONE, "p/", "phone"))
                .with_slot(ArgSlot::new(EMAIL, "e/", "email"))
                .with_slot(ArgSlot::new(ADDRESS, "a/", "address"))
                .with_slot(ArgSlot::new(TAG, "t/", "tag"))
                // Tags stay repeatable.
                .with_constraint(Constraint::once_for_each_of([
                    NAME, PHONE, EMAIL, ADDRESS,
                ])?),
        )?;

        registry.register(
            CommandSpec::new("edit", "Edit the contact at an index")
                .with_slot(ArgSlot::new(INDEX, "i/", "index"))
                .with_slot(ArgSlot::new(NAME, "n/", "name"))
                .with_slot(ArgSlot::new(PHONE, "p/", "phone"))
                .with_slot(ArgSlot::new(EMAIL, "e/", "email"))
                .with_slot(ArgSlot::new(ADDRESS, "a/", "address"))
                .with_slot(ArgSlot::new(TAG, "t/", "tag"))
                .with_constraint(Constraint::once_for_each_of([
                    INDEX, NAME, PHONE, EMAIL, ADDRESS,
                ])?)
                .with_constraint(
                    Constraint::given(INDEX)
                        .prerequisite_for([NAME, PHONE, EMAIL, ADDRESS, TAG])?,
                ),
        )?;

        registry.register(
            CommandSpec::new("delete", "Delete the contact at an index")
                .with_slot(ArgSlot::new(INDEX, "i/", "index"))
                .with_constraint(Constraint::once_for_each_of([INDEX])?),
        )?;

        registry.register(
            CommandSpec::new("find", "Find contacts by keyword or by tag")
                .with_slot(ArgSlot::new(KEYWORD, "k/", "keyword"))
                .with_slot(ArgSlot::new(TAG, "t/", "tag"))
                // One search axis per query; the group also forbids repeats.
                .with_constraint(Constraint::one_among_all_of([KEYWORD, TAG])?),
        )?;

        registry.register(
            CommandSpec::new("list", "List contacts")
                .with_slot(ArgSlot::new(TAG, "t/", "tag filter"))
                .with_constraint(Constraint::once_for_each_of([TAG])?),
        )?;

        registry.register(
            CommandSpec::new("apply", "Record a job application for a contact")
                .with_slot(ArgSlot::new(INDEX, "i/", "contact index"))
                .with_slot(ArgSlot::new(COMPANY, "c/", "company"))
                .with_slot(ArgSlot::new(ROLE, "r/", "role"))
                .with_slot(ArgSlot::new(DEADLINE, "d/", "deadline"))
                .with_slot(ArgSlot::new(STATUS, "s/", "status"))
                .with_constraint(Constraint::once_for_each_of([
                    INDEX, COMPANY, ROLE, DEADLINE, STATUS,
                ])?)
                .with_constraint(
                    Constraint::given(INDEX)
                        .prerequisite_for([COMPANY, ROLE, DEADLINE, STATUS])?,
                ),
        )?;

        registry.register(
            CommandSpec::new("advance", "Move an application to a new status")
                .with_slot(ArgSlot::new(INDEX, "i/", "application index"))
                .with_slot(ArgSlot::new(STATUS, "s/", "status"))
                .with_constraint(Constraint::once_for_each_of([INDEX, STATUS])?)
                .with_constraint(Constraint::given(INDEX).prerequisite_for([STATUS])?),
        )?;

        registry.register(
            CommandSpec::new("apps", "List applications by status or company")
                .with_slot(ArgSlot::new(STATUS, "s/", "status filter"))
                .with_slot(ArgSlot::new(COMPANY, "c/", "company filter"))
                .with_constraint(Constraint::one_among_all_of([STATUS, COMPANY])?),
        )?;

        registry.register(CommandSpec::new("clear", "Delete every record"))?;
        registry.register(CommandSpec::new("help", "Show the command summary"))?;
        registry.register(CommandSpec::new("exit", "Leave the program"))?;

        Ok(registry)
    }

    /// Validate and add a command. Fails fast on schema misuse so a broken
    /// command set never reaches suggestion time.
    pub fn register(&mut self, spec: CommandSpec) -> Result<(), SchemaError> {
        spec.validate()?;
        if self.get(spec.word()).is_some() {
            return Err(SchemaError::DuplicateCommand(spec.word().to_string()));
        }
        self.commands.push(spec);
        Ok(())
    }

    pub fn get(&self, word: &str) -> Option<&CommandSpec> {
        self.commands.iter().find(|c| c.word() == word)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandSpec> {
        self.commands.iter()
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(|c| c.word())
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

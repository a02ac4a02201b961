//! Invocation intent and classification.
//!
//! A run of the orchestrator is classified once, from the raw argument list,
//! into one of three dispatch paths. The classification is a flat membership
//! test over small fixed sets, kept as an explicit function so the contract
//! is directly testable.

/// Help flags recognized in the first argument position.
pub const HELP_FLAGS: &[&str] = &["--help", "-h", "--help-commands"];

/// Commands and flags that only need the distribution metadata, never a
/// native build.
pub const METADATA_COMMANDS: &[&str] = &["--version", "egg_info"];

/// Command that routes to the artifact cleaner.
pub const CLEAN_COMMAND: &str = "clean";

/// Commands only serviced by the setuptools flavor of the metadata
/// publisher; the core fallback cannot run them.
pub const SETUPTOOLS_ONLY_COMMANDS: &[&str] = &[
    "alias",
    "bdist_egg",
    "bdist_wheel",
    "develop",
    "dist_info",
    "easy_install",
    "egg_info",
    "install_egg_info",
    "rotate",
    "saveopts",
    "setopt",
    "test",
    "upload_docs",
];

/// Which dispatch path an invocation takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentClass {
    /// Only the descriptive metadata record is needed
    MetadataOnly,

    /// Native extension modules are compiled; prerequisites are gated
    FullBuild,

    /// Artifact cleanup instead of either build path
    Clean,
}

/// The argument list of one invocation, classified once at startup and
/// immutable thereafter.
#[derive(Debug, Clone)]
pub struct InvocationIntent {
    args: Vec<String>,
}

impl InvocationIntent {
    /// Create an intent from the arguments following the program name.
    pub fn new(args: Vec<String>) -> Self {
        InvocationIntent { args }
    }

    /// The raw argument list.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The requested command, i.e. the first argument if any.
    pub fn requested_command(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    /// Whether the first argument is a help flag.
    pub fn is_help_only(&self) -> bool {
        self.requested_command()
            .is_some_and(|cmd| HELP_FLAGS.contains(&cmd))
    }

    /// Whether the requested command requires the setuptools flavor of the
    /// metadata publisher.
    pub fn needs_setuptools(&self) -> bool {
        self.requested_command()
            .is_some_and(|cmd| SETUPTOOLS_ONLY_COMMANDS.contains(&cmd))
    }

    /// Classify this invocation.
    ///
    /// No arguments, a help flag, or a show-version/show-info keyword in the
    /// first position all avoid the native build machinery; `clean` routes
    /// to the artifact cleaner; everything else is an opaque build command.
    pub fn class(&self) -> IntentClass {
        match self.requested_command() {
            None => IntentClass::MetadataOnly,
            Some(CLEAN_COMMAND) => IntentClass::Clean,
            Some(cmd) if HELP_FLAGS.contains(&cmd) => IntentClass::MetadataOnly,
            Some(cmd) if METADATA_COMMANDS.contains(&cmd) => IntentClass::MetadataOnly,
            Some(_) => IntentClass::FullBuild,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskCreated(String),   // name
    TaskUpdated(String),   // name
    TaskCompleted(String), // name
    TaskDeleted(i64),      // id
    TaskNotFound,
    TaskCannotReopen(i64),
    NoChangesDetected,
    PageLimitExceeded(u32, u32), // requested, maximum

    // === SESSION MESSAGES ===
    AppTitle,
    KeyLegend,
    NoTasks,
    PromptCancelled,
    InvalidPriorityChoice(String), // raw input
    RequestFailed(String),         // error
    FetchFailed(String),           // error
    TerminalNotSupported(String),  // reason
    SessionStarted(String),        // base url
    SessionEnded,

    // === PROMPTS ===
    PromptTaskName,
    PromptTaskPriority,
    PromptUpdateName(String),     // current name
    PromptUpdatePriority(String), // current priority
    PromptBindAddr,
    PromptBaseUrl,
    PromptDatabasePath,

    // === SERVER MESSAGES ===
    Welcome,
    ServerListening(String), // address
    ServerStopping,
    DatabaseOpened(String), // path

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigNotFound,
    ConfigModuleServer,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),        // count
    RunningMigration(u32, String), // version, name
    MigrationCompleted(u32),       // version
    MigrationFailed(u32, String),  // version, error
    AllMigrationsCompleted,
    DatabaseUpToDate,
}

//! The editable fields of a policy, in form order.

/// How a field is edited and stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Integer.
    Number,
    /// Integer byte count.
    Bytes,
    /// Tri-state: set, unset or inherited.
    Bool,
    /// One entry per line.
    StringList,
    Text,
    /// One `H:MM` entry per line.
    TimeOfDayList,
    Select(&'static [(&'static str, &'static str)]),
    /// Select filled from the repository's compression algorithms.
    Compressor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Dotted JSON path, e.g. `retention.keepDaily`.
    pub path: &'static str,
    pub label: &'static str,
    pub help: &'static str,
    pub kind: FieldKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub fields: &'static [FieldSpec],
}

const ACTION_MODES: &[(&str, &str)] = &[
    ("essential", "Must succeed"),
    ("optional", "Ignore failures"),
    ("async", "Run asynchronously, ignore failures"),
];

const LOG_LEVELS: &[(&str, &str)] = &[
    ("0", "disabled"),
    ("1", "minimal"),
    ("5", "normal"),
    ("10", "maximum"),
];

const fn field(path: &'static str, label: &'static str, help: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { path, label, help, kind }
}

pub const SECTIONS: &[Section] = &[
    Section {
        title: "Snapshot Retention",
        fields: &[
            field("retention.keepLatest", "Latest Snapshots", "Number of the most recent snapshots to retain per source", FieldKind::Number),
            field("retention.keepHourly", "Hourly Snapshots", "How many hourly snapshots to retain per source", FieldKind::Number),
            field("retention.keepDaily", "Daily Snapshots", "How many daily snapshots to retain per source", FieldKind::Number),
            field("retention.keepWeekly", "Weekly Snapshots", "How many weekly snapshots to retain per source", FieldKind::Number),
            field("retention.keepMonthly", "Monthly Snapshots", "How many monthly snapshots to retain per source", FieldKind::Number),
            field("retention.keepAnnual", "Annual Snapshots", "How many annual snapshots to retain per source", FieldKind::Number),
            field("retention.ignoreIdenticalSnapshots", "Ignore Identical Snapshots", "Do not save a snapshot identical to the previous one", FieldKind::Bool),
        ],
    },
    Section {
        title: "Files",
        fields: &[
            field("files.ignore", "Ignore Files", "List of file name patterns to ignore", FieldKind::StringList),
            field("files.noParentIgnore", "Ignore Rules From Parent Directories", "Disregard ignore rules defined by parent policies", FieldKind::Bool),
            field("files.ignoreDotFiles", "Ignore Rule Files", "Files containing ignore rules, e.g. .kopiaignore", FieldKind::StringList),
            field("files.noParentDotFiles", "Ignore Rule Files From Parent Directories", "Disregard rule files defined by parent policies", FieldKind::Bool),
            field("files.ignoreCacheDirs", "Ignore Well-Known Cache Directories", "Skip directories containing CACHEDIR.TAG", FieldKind::Bool),
            field("files.maxFileSize", "Ignore Files Larger Than", "Files above this size are not snapshotted", FieldKind::Bytes),
            field("files.oneFileSystem", "Scan Only One Filesystem", "Do not cross filesystem boundaries", FieldKind::Bool),
        ],
    },
    Section {
        title: "Error Handling",
        fields: &[
            field("errorHandling.ignoreFileErrors", "Ignore File Read Errors", "Continue when a file cannot be read", FieldKind::Bool),
            field("errorHandling.ignoreDirectoryErrors", "Ignore Directory Read Errors", "Continue when a directory cannot be read", FieldKind::Bool),
            field("errorHandling.ignoreUnknownTypes", "Ignore Unknown Directory Entries", "Continue on entries of unknown type", FieldKind::Bool),
        ],
    },
    Section {
        title: "Compression",
        fields: &[
            field("compression.compressorName", "Compression Algorithm", "Algorithm used for new content", FieldKind::Compressor),
            field("compression.minSize", "Min File Size", "Files smaller than this are not compressed", FieldKind::Bytes),
            field("compression.maxSize", "Max File Size", "Files larger than this are not compressed", FieldKind::Bytes),
            field("compression.onlyCompress", "Only Compress Extensions", "Only files with these extensions are compressed", FieldKind::StringList),
            field("compression.noParentOnlyCompress", "Ignore Parent Only-Compress Rules", "Disregard extensions listed by parent policies", FieldKind::Bool),
            field("compression.neverCompress", "Never Compress Extensions", "Files with these extensions are never compressed", FieldKind::StringList),
            field("compression.noParentNeverCompress", "Ignore Parent Never-Compress Rules", "Disregard extensions listed by parent policies", FieldKind::Bool),
        ],
    },
    Section {
        title: "Scheduling",
        fields: &[
            field("scheduling.intervalSeconds", "Snapshot Frequency", "Seconds between automatic snapshots", FieldKind::Number),
            field("scheduling.timeOfDay", "Times Of Day", "Snapshot at these times, one HH:MM per line", FieldKind::TimeOfDayList),
            field("scheduling.noParentTimeOfDay", "Ignore Parent Times Of Day", "Disregard times defined by parent policies", FieldKind::Bool),
            field("scheduling.cron", "Cron Expressions", "Snapshot at times matching these expressions, one per line", FieldKind::StringList),
            field("scheduling.manual", "Manual Snapshots Only", "Disable automatic snapshots", FieldKind::Bool),
            field("scheduling.runMissed", "Run Missed Snapshots", "Take a snapshot on start when one was missed", FieldKind::Bool),
        ],
    },
    Section {
        title: "Upload",
        fields: &[
            field("upload.maxParallelSnapshots", "Max Parallel Snapshots", "Sources snapshotted at the same time", FieldKind::Number),
            field("upload.maxParallelFileReads", "Max Parallel File Reads", "Files read at the same time", FieldKind::Number),
            field("upload.parallelUploadAboveSize", "Parallel Upload Above Size", "Files above this size upload in parallel", FieldKind::Bytes),
        ],
    },
    Section {
        title: "Snapshot Actions",
        fields: &[
            field("actions.beforeSnapshotRoot.script", "Before Snapshot", "Script run before the snapshot starts", FieldKind::Text),
            field("actions.beforeSnapshotRoot.timeout", "Before Snapshot Timeout", "Seconds; 300 when empty", FieldKind::Number),
            field("actions.beforeSnapshotRoot.mode", "Before Snapshot Mode", "How a script failure is handled", FieldKind::Select(ACTION_MODES)),
            field("actions.afterSnapshotRoot.script", "After Snapshot", "Script run after the snapshot finishes", FieldKind::Text),
            field("actions.afterSnapshotRoot.timeout", "After Snapshot Timeout", "Seconds; 300 when empty", FieldKind::Number),
            field("actions.afterSnapshotRoot.mode", "After Snapshot Mode", "How a script failure is handled", FieldKind::Select(ACTION_MODES)),
            field("actions.beforeFolder.script", "Before Folder", "Script run before each folder", FieldKind::Text),
            field("actions.beforeFolder.timeout", "Before Folder Timeout", "Seconds; 300 when empty", FieldKind::Number),
            field("actions.beforeFolder.mode", "Before Folder Mode", "How a script failure is handled", FieldKind::Select(ACTION_MODES)),
            field("actions.afterFolder.script", "After Folder", "Script run after each folder", FieldKind::Text),
            field("actions.afterFolder.timeout", "After Folder Timeout", "Seconds; 300 when empty", FieldKind::Number),
            field("actions.afterFolder.mode", "After Folder Mode", "How a script failure is handled", FieldKind::Select(ACTION_MODES)),
        ],
    },
    Section {
        title: "Logging",
        fields: &[
            field("logging.directories.snapshotted", "Directory Snapshotted", "Log level for snapshotted directories", FieldKind::Select(LOG_LEVELS)),
            field("logging.directories.ignored", "Directory Ignored", "Log level for ignored directories", FieldKind::Select(LOG_LEVELS)),
            field("logging.entries.snapshotted", "Entry Snapshotted", "Log level for snapshotted entries", FieldKind::Select(LOG_LEVELS)),
            field("logging.entries.ignored", "Entry Ignored", "Log level for ignored entries", FieldKind::Select(LOG_LEVELS)),
            field("logging.entries.cacheHit", "Entry Cache Hit", "Log level for cache hits", FieldKind::Select(LOG_LEVELS)),
            field("logging.entries.cacheMiss", "Entry Cache Miss", "Log level for cache misses", FieldKind::Select(LOG_LEVELS)),
        ],
    },
];

pub fn find_field(path: &str) -> Option<&'static FieldSpec> {
    SECTIONS.iter().flat_map(|s| s.fields.iter()).find(|f| f.path == path)
}

/// Whether a select stores its value as a number (log levels) or a string.
pub(crate) fn select_is_numeric(options: &[(&str, &str)]) -> bool {
    !options.is_empty() && options.iter().all(|(v, _)| v.parse::<i64>().is_ok())
}

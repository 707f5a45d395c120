//! The built-in keyword table.
//!
//! Strict SQL keywords only. Pseudo-columns (`sysdate`, `rowid`, `rownum`,
//! `level`, `uid`, `sid`, `oid`, `systimestamp`, `localtimestamp`) and
//! words that routinely appear as column names (`id`, `name`, `no`,
//! `test`, `null`) are deliberately absent so the tokenizer classifies
//! them as identifiers: two statements that differ only in such a column
//! name must not collapse to the same canonical form.
//!
//! The set is known at build time, so it is a sorted static slice with
//! binary-search lookup rather than a runtime map.

use std::sync::LazyLock;

/// All keywords, lowercase, sorted. `KeywordSet::contains` relies on the
/// ordering; `tests::keywords_are_sorted_and_unique` enforces it.
static KEYWORDS: &[&str] = &[
    "access", "account", "activate", "add", "admin", "advise", "after", "all",
    "allocate", "allow", "alter", "analyze", "ancillary", "and", "any", "apply",
    "archive", "archivelog", "array", "as", "asc", "associate", "at", "attribute",
    "attributes", "audit", "authenticated", "authid", "authorization", "auto",
    "autoallocate", "autoextend", "automatic", "availability", "backup", "become",
    "before", "begin", "behalf", "between", "bfile", "binary", "binding", "bitmap",
    "blob", "block", "body", "both", "buffer", "build", "bulk", "by", "cache",
    "call", "cancel", "cascade", "case", "cast", "category", "chained", "change",
    "char", "character", "check", "checkpoint", "child", "choose", "chunk",
    "class", "clear", "clob", "clone", "close", "cluster", "coalesce", "column",
    "columns", "comment", "commit", "committed", "compatibility", "compile",
    "complete", "composite", "compress", "compute", "connect", "consider",
    "consistent", "constraint", "constraints", "contents", "context", "continue",
    "controlfile", "convert", "corruption", "cost", "create", "cross", "cube",
    "current", "cursor", "cycle", "dangling", "data", "database", "datafile",
    "datafiles", "date", "day", "ddl", "deallocate", "debug", "dec", "decimal",
    "declare", "default", "deferrable", "deferred", "definer", "degree", "delete",
    "demand", "desc", "determines", "dictionary", "dimension", "directory",
    "disable", "disassociate", "disconnect", "disk", "diskgroup", "disks",
    "dismount", "distinct", "distributed", "dml", "double", "drop", "dump",
    "each", "else", "empty", "enable", "end", "enforce", "entry", "escape",
    "estimate", "except", "exceptions", "exchange", "excluding", "exclusive",
    "execute", "exists", "expire", "explain", "extent", "external", "externally",
    "failed", "failgroup", "fast", "file", "filter", "final", "finish", "first",
    "flashback", "float", "flush", "following", "for", "force", "foreign",
    "freelist", "freelists", "freepools", "fresh", "from", "full", "function",
    "functions", "generated", "global", "globally", "grant", "group", "groups",
    "guard", "hash", "having", "heap", "hierarchy", "high", "hour", "identified",
    "identifier", "immediate", "in", "including", "increment", "index", "indexed",
    "indexes", "indextype", "indextypes", "infinite", "initial", "initialized",
    "initially", "initrans", "inner", "insert", "instance", "instances",
    "instead", "int", "integer", "integrity", "intermediate", "internal",
    "intersect", "interval", "into", "invalidate", "is", "isolation", "join",
    "keep", "key", "kill", "last", "leading", "left", "less", "library", "like",
    "limit", "link", "list", "lob", "local", "locator", "lock", "locked", "log",
    "logfile", "logging", "logical", "logoff", "logon", "long", "low", "main",
    "manage", "managed", "management", "manual", "map", "mapping", "master",
    "matched", "materialized", "maxdatafiles", "maxextents", "maximize",
    "maxinstances", "maxlogfiles", "maxloghistory", "maxlogmembers", "maxsize",
    "maxtrans", "maxvalue", "measures", "member", "memory", "merge",
    "microsecond", "millisecond", "minextents", "minimize", "minimum", "minus",
    "minute", "minvalue", "mirror", "mlslabel", "mode", "model", "modify",
    "monitoring", "month", "mount", "move", "movement", "multiset", "named",
    "national", "natural", "nav", "nchar", "nclob", "nested", "never", "new",
    "next", "noarchivelog", "noaudit", "nocache", "nocompress", "nocopy",
    "nocycle", "nodelay", "noforce", "nologging", "nomapping", "nomaxvalue",
    "nominimize", "nominvalue", "nomonitoring", "none", "noorder", "noparallel",
    "norely", "norepair", "noresetlogs", "noreverse", "normal",
    "norowdependencies", "nosort", "noswitch", "not", "nothing", "notimeout",
    "novalidate", "nowait", "number", "numeric", "nvarchar2", "object", "of",
    "off", "offline", "on", "online", "only", "open", "operator", "optimal",
    "option", "or", "order", "organization", "out", "outer", "outline", "over",
    "overflow", "overlaps", "own", "package", "packages", "parallel",
    "parameters", "parent", "parity", "part", "partial", "partition",
    "partitions", "passing", "password", "path", "pctfree", "pctincrease",
    "pctthreshold", "pctused", "pctversion", "performance", "permanent", "pfile",
    "physical", "pipelined", "pivot", "plan", "plsql", "policy",
    "post_transaction", "power", "prebuilt", "preceding", "precision", "prepare",
    "present", "preserve", "primary", "prior", "private", "privilege",
    "privileges", "procedure", "profile", "protection", "public", "purge",
    "query", "queue", "quiesce", "quota", "range", "raw", "read", "reads",
    "real", "rebalance", "rebuild", "records_per_block", "recover", "recovery",
    "recycle", "redo", "reduced", "ref", "references", "referencing", "refresh",
    "register", "reject", "relational", "rely", "rename", "repair", "replace",
    "reset", "resetlogs", "resize", "resolve", "resolver", "resource",
    "restrict", "restricted", "resumable", "resume", "retention", "return",
    "returning", "reuse", "reverse", "revoke", "rewrite", "right", "rollback",
    "rollup", "row", "rowdependencies", "rows", "sample", "savepoint", "schema",
    "scn", "scope", "second", "segment", "select", "selectivity", "sequence",
    "sequential", "serializable", "session", "sessions_per_user", "set", "sets",
    "settings", "share", "shared", "shrink", "shutdown", "siblings", "since",
    "single", "size", "skip", "smallint", "snapshot", "some", "sort", "source",
    "space", "specification", "spfile", "split", "standby", "start",
    "statement_id", "static", "statistics", "stop", "storage", "store",
    "structure", "submultiset", "subpartition", "subpartitions",
    "substitutable", "successful", "supplemental", "suspend", "switch",
    "switchover", "synonym", "sys", "system", "table", "tables", "tablespace",
    "tempfile", "template", "temporary", "than", "then", "thread", "through",
    "time", "timeout", "timestamp", "timezone_abbr", "timezone_hour",
    "timezone_minute", "timezone_region", "to", "trailing", "transaction",
    "trigger", "triggers", "truncate", "trusted", "type", "types", "unarchived",
    "unbounded", "under", "undo", "uniform", "union", "unique", "unlimited",
    "unlock", "unpivot", "unquiesce", "unrecoverable", "until", "unusable",
    "unused", "update", "upgrade", "usage", "use", "user", "users", "using",
    "validate", "validation", "value", "values", "varchar", "varchar2",
    "varray", "varying", "view", "views", "wait", "when", "whenever", "where",
    "with", "within", "without", "work", "write", "xmlschema", "year", "zone",
];

/// The immutable keyword set consulted by the tokenizer.
///
/// Lookup is case-sensitive over lowercase entries; callers lowercase the
/// candidate first (`Tokenizer` does this for every identifier).
#[derive(Debug)]
pub struct KeywordSet {
    words: &'static [&'static str],
}

static BUILTIN: LazyLock<KeywordSet> = LazyLock::new(|| KeywordSet { words: KEYWORDS });

impl KeywordSet {
    /// The built-in keyword set singleton. Initialized on first use and
    /// immutable afterwards, so concurrent binder calls need no locking.
    pub fn builtin() -> &'static KeywordSet {
        &BUILTIN
    }

    /// Whether `word` (already lowercase) is a keyword.
    pub fn contains(&self, word: &str) -> bool {
        self.words.binary_search(&word).is_ok()
    }

    /// Number of keywords in the set.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the set is empty (never true for the built-in set).
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate the keywords in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.words.iter().copied()
    }
}

/// Force initialization of the built-in keyword set.
///
/// Idempotent. Calling this once at startup guarantees later binder calls
/// from any thread see a fully built set; the `LazyLock` makes that safe
/// even without the explicit call.
pub fn initialize_keywords() {
    let _ = KeywordSet::builtin();
}

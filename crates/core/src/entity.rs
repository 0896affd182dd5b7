//! Entity table registry.
//!
//! Every table the service exposes is listed here together with the columns
//! callers may write. Request documents are resolved against these
//! allow-lists, so SQL identifiers always come from this module and never
//! from caller input.

use std::fmt;

/// Storage kind of a writable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Text,
    Integer,
    Float,
    Boolean,
    Date,
    /// List or object value stored as canonical JSON text.
    Structured,
}

impl ColumnKind {
    /// Human-readable kind used in validation messages.
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Text => "a string",
            Self::Integer => "an integer",
            Self::Float => "a number",
            Self::Boolean => "a boolean",
            Self::Date => "a date (YYYY-MM-DD)",
            Self::Structured => "a list or object",
        }
    }
}

/// A writable column of an entity table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub kind: ColumnKind,
    /// Must be present and non-null on insert; may not be nulled by an update.
    pub required: bool,
}

const fn col(name: &'static str, kind: ColumnKind) -> ColumnDef {
    ColumnDef {
        name,
        kind,
        required: false,
    }
}

const fn required(name: &'static str, kind: ColumnKind) -> ColumnDef {
    ColumnDef {
        name,
        kind,
        required: true,
    }
}

use ColumnKind::{Boolean, Date, Float, Integer, Structured, Text};

const PROJECT_COLUMNS: &[ColumnDef] = &[
    required("job_no", Text),
    col("project_name", Text),
    col("customer", Text),
    col("designer", Text),
    col("project_type", Structured),
    col("processes", Structured),
    col("overallstatus", Text),
    col("quantity", Integer),
    col("start_date", Date),
    col("due_date", Date),
    col("remarks", Text),
];

const CUSTOMER_COLUMNS: &[ColumnDef] = &[
    required("all_customers", Text),
    col("contact_person", Text),
    col("email", Text),
    col("phone", Text),
    col("address", Text),
];

const DESIGNER_COLUMNS: &[ColumnDef] = &[
    required("designer_name", Text),
    col("email", Text),
    col("phone", Text),
    col("specialization", Text),
];

const PROCESS_COLUMNS: &[ColumnDef] = &[
    required("process_name", Text),
    col("description", Text),
    col("sequence", Integer),
    col("is_active", Boolean),
];

const EMPLOYEE_COLUMNS: &[ColumnDef] = &[
    required("employee_name", Text),
    col("employee_code", Text),
    col("designation", Text),
    col("email", Text),
    col("phone", Text),
    col("department", Structured),
    col("joining_date", Date),
];

const LIVE_PROJECT_COLUMNS: &[ColumnDef] = &[
    required("job_no", Text),
    col("project_name", Text),
    col("customer", Text),
    col("assigned_to", Structured),
    col("stage", Text),
    col("progress", Integer),
    col("hours_logged", Float),
    col("deadline", Date),
    col("remarks", Text),
];

/// The entity tables exposed over HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityTable {
    Projects,
    Customers,
    Designers,
    Processes,
    Employee,
    LiveProjects,
}

impl EntityTable {
    pub const ALL: [Self; 6] = [
        Self::Projects,
        Self::Customers,
        Self::Designers,
        Self::Processes,
        Self::Employee,
        Self::LiveProjects,
    ];

    /// Name of the backing table, also used as the URL path segment.
    pub const fn table_name(self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Customers => "customers",
            Self::Designers => "designers",
            Self::Processes => "processes",
            Self::Employee => "employee",
            Self::LiveProjects => "live_projects",
        }
    }

    /// Singular display name used in error messages.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Projects => "Project",
            Self::Customers => "Customer",
            Self::Designers => "Designer",
            Self::Processes => "Process",
            Self::Employee => "Employee",
            Self::LiveProjects => "Live project",
        }
    }

    /// Writable columns in declaration order.
    pub const fn columns(self) -> &'static [ColumnDef] {
        match self {
            Self::Projects => PROJECT_COLUMNS,
            Self::Customers => CUSTOMER_COLUMNS,
            Self::Designers => DESIGNER_COLUMNS,
            Self::Processes => PROCESS_COLUMNS,
            Self::Employee => EMPLOYEE_COLUMNS,
            Self::LiveProjects => LIVE_PROJECT_COLUMNS,
        }
    }

    /// Look up a writable column by name.
    pub fn column(self, name: &str) -> Option<&'static ColumnDef> {
        self.columns().iter().find(|c| c.name == name)
    }

    pub fn required_columns(self) -> impl Iterator<Item = &'static ColumnDef> {
        self.columns().iter().filter(|c| c.required)
    }

    pub fn structured_columns(self) -> impl Iterator<Item = &'static ColumnDef> {
        self.columns()
            .iter()
            .filter(|c| c.kind == ColumnKind::Structured)
    }
}

impl fmt::Display for EntityTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

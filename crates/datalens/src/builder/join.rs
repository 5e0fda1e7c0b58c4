use std::fmt;

/// JOIN flavour offered by the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JoinKind {
    Inner,
    #[default]
    Left,
    Right,
}

impl JoinKind {
    pub const ALL: [JoinKind; 3] = [JoinKind::Inner, JoinKind::Left, JoinKind::Right];

    pub fn as_sql(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
        }
    }

    /// Normalize join text typed or saved by the UI.
    ///
    /// Accepts `INNER`, `INNER JOIN`, `left join`, `RIGHT OUTER JOIN` and the
    /// like; anything unrecognized becomes [`JoinKind::Left`].
    pub fn from_text(s: &str) -> JoinKind {
        let upper = s.trim().to_uppercase();
        let words: Vec<&str> = upper.split_whitespace().collect();
        let head = match words.as_slice() {
            [kind] | [kind, "JOIN"] | [kind, "OUTER", "JOIN"] => *kind,
            _ => return JoinKind::Left,
        };
        match head {
            "INNER" => JoinKind::Inner,
            "RIGHT" => JoinKind::Right,
            _ => JoinKind::Left,
        }
    }
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Which table of the statement a column or ON clause binds to.
///
/// `Join(i)` is the `i`-th declared join (0-based) and renders as alias
/// `t{i+1}`; the main table is `t0` whenever any join exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub enum TableRef {
    #[default]
    Main,
    Join(usize),
}

impl TableRef {
    /// The statement alias for this reference (`t0`, `t1`, ...).
    pub fn alias(self) -> String {
        match self {
            TableRef::Main => "t0".to_string(),
            TableRef::Join(i) => format!("t{}", i + 1),
        }
    }

    /// Parse the saved form: `""` is the main table, `jN` (N >= 1) the N-th join.
    pub fn from_saved(s: &str) -> Option<TableRef> {
        if s.is_empty() {
            return Some(TableRef::Main);
        }
        let digits = s.strip_prefix('j').or_else(|| s.strip_prefix('J'))?;
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        match digits.parse::<usize>() {
            Ok(n) if n >= 1 => Some(TableRef::Join(n - 1)),
            _ => None,
        }
    }

    /// The saved form understood by [`TableRef::from_saved`].
    pub fn to_saved(self) -> String {
        match self {
            TableRef::Main => String::new(),
            TableRef::Join(i) => format!("j{}", i + 1),
        }
    }
}

/// One JOIN row of the builder.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JoinSpec {
    pub kind: JoinKind,
    /// Related table being joined in.
    pub table: String,
    /// Table the ON clause's left column belongs to.
    pub left: TableRef,
    pub left_column: String,
    /// Column of the related table.
    pub right_column: String,
}

impl JoinSpec {
    pub fn new(kind: JoinKind, table: impl Into<String>) -> Self {
        Self {
            kind,
            table: table.into(),
            ..Default::default()
        }
    }

    pub fn inner(table: impl Into<String>) -> Self {
        Self::new(JoinKind::Inner, table)
    }

    pub fn left(table: impl Into<String>) -> Self {
        Self::new(JoinKind::Left, table)
    }

    pub fn right(table: impl Into<String>) -> Self {
        Self::new(JoinKind::Right, table)
    }

    /// Set the ON clause: `left.left_column = <this join>.right_column`.
    pub fn on(
        mut self,
        left: TableRef,
        left_column: impl Into<String>,
        right_column: impl Into<String>,
    ) -> Self {
        self.left = left;
        self.left_column = left_column.into();
        self.right_column = right_column.into();
        self
    }
}

/// A column picked for the projection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectedColumn {
    pub table: TableRef,
    pub column: String,
}

impl SelectedColumn {
    pub fn new(table: TableRef, column: impl Into<String>) -> Self {
        Self {
            table,
            column: column.into(),
        }
    }
}

/// ORDER BY direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderDir {
    #[default]
    Asc,
    Desc,
}

impl OrderDir {
    pub fn as_sql(self) -> &'static str {
        match self {
            OrderDir::Asc => "ASC",
            OrderDir::Desc => "DESC",
        }
    }

    /// `DESC` (any case) is descending; everything else ascending.
    pub fn from_text(s: &str) -> OrderDir {
        if s.trim().eq_ignore_ascii_case("DESC") {
            OrderDir::Desc
        } else {
            OrderDir::Asc
        }
    }
}

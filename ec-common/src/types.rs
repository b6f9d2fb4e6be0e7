//! Common types used throughout the compiler
//!
//! Declared data types, symbol records and the symbol table shared by the
//! parser (which fills it) and the code generator (which reads it).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Symbol identifier (index into the symbol table)
pub type SymbolId = u32;

/// Declared type tag of a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Bool,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    String,
    Void,
    /// Not known yet (forward-referenced functions, external C functions)
    Unknown,
}

impl DataType {
    pub fn is_floating(&self) -> bool {
        matches!(self, DataType::Float | DataType::Double)
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            DataType::Bool | DataType::Char | DataType::Short | DataType::Int | DataType::Long
        )
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Bool => "bool",
            DataType::Char => "char",
            DataType::Short => "short",
            DataType::Int => "int",
            DataType::Long => "long",
            DataType::Float => "float",
            DataType::Double => "double",
            DataType::String => "string",
            DataType::Void => "void",
            DataType::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// What a name denotes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    Variable,
    Constant,
    Function,
    Label,
    StringLiteral,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolKind::Variable => write!(f, "variable"),
            SymbolKind::Constant => write!(f, "constant"),
            SymbolKind::Function => write!(f, "function"),
            SymbolKind::Label => write!(f, "label"),
            SymbolKind::StringLiteral => write!(f, "string literal"),
        }
    }
}

/// Symbol table entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    pub id: SymbolId,
    pub name: String,
    pub kind: SymbolKind,
    pub data_type: DataType,
    pub is_array: bool,
}

impl Symbol {
    pub fn new(id: SymbolId, name: String, kind: SymbolKind) -> Self {
        Self {
            id,
            name,
            kind,
            data_type: DataType::Unknown,
            is_array: false,
        }
    }
}

/// A second declaration disagreed with the type already on record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeConflict {
    pub existing: DataType,
    pub existing_array: bool,
}

#[derive(Debug, Clone)]
struct Entry {
    symbol: Symbol,
    next: Option<SymbolId>,
}

/// Hash table of symbols with chained buckets.
///
/// Entries live in an arena and each bucket holds the head of a singly
/// linked chain threaded through the arena, so a `SymbolId` stays valid for
/// the lifetime of the table. Names are unique: adding an existing name
/// hands back the entry already there.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    buckets: Vec<Option<SymbolId>>,
    entries: Vec<Entry>,
}

impl SymbolTable {
    pub const BUCKET_COUNT: usize = 1237;
    const MULTIPLIER: usize = 31;

    pub fn new() -> Self {
        Self {
            buckets: vec![None; Self::BUCKET_COUNT],
            entries: Vec::new(),
        }
    }

    fn hash(name: &str) -> usize {
        name.bytes().fold(0usize, |h, byte| {
            h.wrapping_mul(Self::MULTIPLIER).wrapping_add(byte as usize)
        }) % Self::BUCKET_COUNT
    }

    /// Look up a symbol by name
    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        let mut cursor = self.buckets[Self::hash(name)];
        while let Some(id) = cursor {
            let entry = &self.entries[id as usize];
            if entry.symbol.name == name {
                return Some(id);
            }
            cursor = entry.next;
        }
        None
    }

    /// Insert `name` unless it is already present; either way return its id.
    /// An existing entry is never modified, whatever `kind` says.
    pub fn add(&mut self, name: &str, kind: SymbolKind) -> SymbolId {
        if let Some(id) = self.lookup(name) {
            return id;
        }

        let bucket = Self::hash(name);
        let id = self.entries.len() as SymbolId;
        self.entries.push(Entry {
            symbol: Symbol::new(id, name.to_string(), kind),
            next: self.buckets[bucket],
        });
        self.buckets[bucket] = Some(id);
        id
    }

    /// Get symbol data by ID
    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.entries.get(id as usize).map(|entry| &entry.symbol)
    }

    /// Record the declared type of a symbol. The first known type sticks;
    /// restating the same type is fine, a different one is a conflict.
    pub fn set_type(
        &mut self,
        id: SymbolId,
        data_type: DataType,
        is_array: bool,
    ) -> Result<(), TypeConflict> {
        let Some(entry) = self.entries.get_mut(id as usize) else {
            return Ok(());
        };
        let symbol = &mut entry.symbol;
        if symbol.data_type == DataType::Unknown {
            symbol.data_type = data_type;
            symbol.is_array = is_array;
            Ok(())
        } else if symbol.data_type == data_type && symbol.is_array == is_array {
            Ok(())
        } else {
            Err(TypeConflict {
                existing: symbol.data_type,
                existing_array: symbol.is_array,
            })
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All symbols in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.entries.iter().map(|entry| &entry.symbol)
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

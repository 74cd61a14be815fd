//! A table for symbols. The table maintains a stack of scopes and a
//! mapping of a name to data for each item in a scope.
//!
//! The typical way to use the symbol table is to own one inside a
//! Visitor. Use the scope functions (enter, exit) based on visited
//! objects that delineate scopes and the item functions (add, find) as
//! individual items come into and go out of definition.
use std::collections::HashMap;
use std::collections::LinkedList;
use std::fmt;
use std::hash::Hash;

use ferrost_dsl::core::Located;
use ferrost_dsl::diagnostic::{Diagnostic, Label};
use ferrost_problems::Problem;

/// Keys must carry a source position and render as text so that the
/// table can report a collision against the earlier declaration.
pub trait Key: Eq + Hash + Clone + Located + fmt::Display {}

struct Scope<K: Key, V> {
    table: HashMap<K, V>,
}

impl<K: Key, V> Scope<K, V> {
    fn new() -> Self {
        Scope {
            table: HashMap::new(),
        }
    }

    /// Tries to add the name into the scope with the specified value.
    ///
    /// If the scope does not have this name, adds the name with the
    /// value and returns `None`.
    ///
    /// If the scope does have this name, the value is not updated and
    /// the existing key is returned. The existing key matters because
    /// keys can be equal without being identical.
    fn try_add(&mut self, name: &K, value: V) -> Option<&K> {
        // The map must be unmodified when the key already exists, so
        // test for the key first.
        if !self.table.contains_key(name) {
            self.table.insert(name.clone(), value);
            None
        } else {
            let (existing, _) = self.table.get_key_value(name).unwrap();
            Some(existing)
        }
    }

    fn find(&self, name: &K) -> Option<&V> {
        self.table.get(name)
    }
}

/// A stack of scopes. The innermost scope is the front of the stack.
pub struct SymbolTable<K: Key, V> {
    stack: LinkedList<Scope<K, V>>,
}

impl<K: Key, V> SymbolTable<K, V> {
    /// Creates a symbol table with a single global scope.
    pub fn new() -> Self {
        let mut stack = LinkedList::new();
        stack.push_back(Scope::new());
        SymbolTable { stack }
    }

    /// Enters a new scope.
    ///
    /// This creates a new context that can hide declarations from
    /// outer scopes.
    pub fn enter(&mut self) {
        self.stack.push_front(Scope::new())
    }

    /// Exits the current scope.
    ///
    /// This removes the current scope and every name declared in it.
    pub fn exit(&mut self) {
        self.stack.pop_front();
    }

    /// Adds the name to the innermost scope with the specified value.
    ///
    /// Fails when the name already exists in the innermost scope. The
    /// same name in an outer scope is not a collision (the new name
    /// shadows the outer one).
    pub fn add(&mut self, name: &K, value: V) -> Result<(), Diagnostic> {
        let scope = match self.stack.front_mut() {
            Some(scope) => scope,
            None => return Ok(()),
        };
        match scope.try_add(name, value) {
            None => Ok(()),
            Some(existing) => Err(Diagnostic::problem(
                Problem::DuplicateDeclaration,
                Label::span(&name.span(), format!("Duplicate declaration of '{}'", name)),
            )
            .with_secondary(Label::span(&existing.span(), "First declared here"))),
        }
    }

    /// Returns the value for the given name from the nearest enclosing
    /// scope that declares it, or `None` when no scope does.
    pub fn find(&self, name: &K) -> Option<&V> {
        self.stack.iter().find_map(|scope| scope.find(name))
    }
}

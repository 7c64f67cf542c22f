use std::{collections::HashMap, fmt::Display, rc::Rc};

/// What a named entity denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjKind {
    Con,
    Val,
    Var,
}

impl Display for ObjKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ObjKind::Con => "const",
            ObjKind::Val => "val",
            ObjKind::Var => "var",
        };
        write!(f, "{}", name)
    }
}

/// A named language entity such as a constant or variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    pub kind: ObjKind,
    pub name: String,
}

impl Object {
    pub fn new(kind: ObjKind, name: impl Into<String>) -> Self {
        Object {
            kind,
            name: name.into(),
        }
    }
}

/// Names declared in one scope, with a link to the enclosing one.
#[derive(Debug, Default)]
pub struct Scope {
    pub outer: Option<Box<Scope>>,
    objects: HashMap<String, Rc<Object>>,
}

impl Scope {
    pub fn new(outer: Option<Box<Scope>>) -> Self {
        Scope {
            outer,
            objects: HashMap::new(),
        }
    }

    /// Looks `name` up in this scope only; outer scopes are ignored.
    pub fn lookup(&self, name: &str) -> Option<Rc<Object>> {
        self.objects.get(name).cloned()
    }

    /// Declares `obj` unless the name is taken, in which case the scope is
    /// left unchanged and the existing object is returned.
    pub fn insert(&mut self, obj: Object) -> Option<Rc<Object>> {
        if let Some(alt) = self.objects.get(&obj.name) {
            return Some(Rc::clone(alt));
        }
        self.objects.insert(obj.name.clone(), Rc::new(obj));
        None
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// JVM class access flags (`access_flags` of a `ClassFile`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ClassAccessFlags: u16 {
        /// Declared public
        const PUBLIC = 0x0001;
        /// Declared final
        const FINAL = 0x0010;
        /// Treat superclass methods specially (historic)
        const SUPER = 0x0020;
        /// Is an interface
        const INTERFACE = 0x0200;
        /// Declared abstract
        const ABSTRACT = 0x0400;
        /// Not present in the source code
        const SYNTHETIC = 0x1000;
        /// Declared as an annotation interface
        const ANNOTATION = 0x2000;
        /// Declared as an enum class
        const ENUM = 0x4000;
    }
}

bitflags! {
    /// JVM field access flags (`access_flags` of a `field_info`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FieldAccessFlags: u16 {
        /// Declared public
        const PUBLIC = 0x0001;
        /// Declared private
        const PRIVATE = 0x0002;
        /// Declared protected
        const PROTECTED = 0x0004;
        /// Declared static
        const STATIC = 0x0008;
        /// Declared final
        const FINAL = 0x0010;
        /// Declared volatile
        const VOLATILE = 0x0040;
        /// Declared transient
        const TRANSIENT = 0x0080;
        /// Not present in the source code
        const SYNTHETIC = 0x1000;
        /// Holds an enum constant
        const ENUM = 0x4000;
    }
}

bitflags! {
    /// JVM method access flags (`access_flags` of a `method_info`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MethodAccessFlags: u16 {
        /// Declared public
        const PUBLIC = 0x0001;
        /// Declared private
        const PRIVATE = 0x0002;
        /// Declared protected
        const PROTECTED = 0x0004;
        /// Declared static
        const STATIC = 0x0008;
        /// Declared final
        const FINAL = 0x0010;
        /// Declared synchronized
        const SYNCHRONIZED = 0x0020;
        /// Generated by the compiler to bridge a signature change
        const BRIDGE = 0x0040;
        /// Declared with a variable-arity parameter
        const VARARGS = 0x0080;
        /// Implemented in native code
        const NATIVE = 0x0100;
        /// Declared abstract
        const ABSTRACT = 0x0400;
        /// Declared strictfp (historic)
        const STRICT = 0x0800;
        /// Not present in the source code
        const SYNTHETIC = 0x1000;
    }
}

/// Fully qualified reference to a class member, in official names.
///
/// Used as the join key for bouncer targets and as the identity of recorded bouncer
/// nodes. Rendered as `owner#name#descriptor`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberRef {
    /// Official name of the owning class.
    pub owner: String,
    /// Official member name.
    pub name: String,
    /// JVM descriptor of the member.
    pub descriptor: String,
}

impl MemberRef {
    /// Creates a member reference.
    pub fn new(
        owner: impl Into<String>,
        name: impl Into<String>,
        descriptor: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }
}

impl fmt::Display for MemberRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}#{}", self.owner, self.name, self.descriptor)
    }
}

/// Root of an externally supplied structure tree.
///
/// Inner classes nest inside their enclosing [`ClassStructure`]; lookups flatten the
/// nesting through a [`crate::structure::StructureIndex`].
#[derive(Debug, Clone, Default)]
pub struct JarStructure {
    /// Top-level classes.
    pub classes: Vec<ClassStructure>,
}

impl JarStructure {
    /// Creates an empty structure tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a top-level class, builder style.
    #[must_use]
    pub fn with_class(mut self, class: ClassStructure) -> Self {
        self.classes.push(class);
        self
    }
}

/// Structure data for a single class.
#[derive(Debug, Clone)]
pub struct ClassStructure {
    /// Official class name, `$`-joined for nested classes.
    pub name: String,
    /// JVM access flags.
    pub access: ClassAccessFlags,
    /// True if the class carries a `Record` attribute.
    pub is_record: bool,
    /// Structure data for the class's fields.
    pub fields: Vec<FieldStructure>,
    /// Structure data for the class's methods.
    pub methods: Vec<MethodStructure>,
    /// Nested inner classes, flattened by the index.
    pub inner_classes: Vec<ClassStructure>,
}

impl ClassStructure {
    /// Creates an empty class structure.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            access: ClassAccessFlags::empty(),
            is_record: false,
            fields: Vec::new(),
            methods: Vec::new(),
            inner_classes: Vec::new(),
        }
    }

    /// Sets the access flags, builder style.
    #[must_use]
    pub fn with_access(mut self, access: ClassAccessFlags) -> Self {
        self.access = access;
        self
    }

    /// Marks the class as a record, builder style.
    #[must_use]
    pub fn with_record(mut self) -> Self {
        self.is_record = true;
        self
    }

    /// Adds field structure data, builder style.
    #[must_use]
    pub fn with_field(mut self, field: FieldStructure) -> Self {
        self.fields.push(field);
        self
    }

    /// Adds method structure data, builder style.
    #[must_use]
    pub fn with_method(mut self, method: MethodStructure) -> Self {
        self.methods.push(method);
        self
    }

    /// Adds a nested inner class, builder style.
    #[must_use]
    pub fn with_inner(mut self, inner: ClassStructure) -> Self {
        self.inner_classes.push(inner);
        self
    }

    /// Looks up field structure by official name.
    pub fn field(&self, name: &str) -> Option<&FieldStructure> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Looks up method structure by official name and descriptor.
    pub fn method(&self, name: &str, descriptor: &str) -> Option<&MethodStructure> {
        self.methods
            .iter()
            .find(|m| m.name == name && m.descriptor == descriptor)
    }
}

/// Structure data for a single field.
#[derive(Debug, Clone)]
pub struct FieldStructure {
    /// Official field name.
    pub name: String,
    /// JVM field descriptor.
    pub descriptor: String,
    /// JVM access flags.
    pub access: FieldAccessFlags,
}

impl FieldStructure {
    /// Creates field structure data with empty flags.
    pub fn new(name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptor: descriptor.into(),
            access: FieldAccessFlags::empty(),
        }
    }

    /// Sets the access flags, builder style.
    #[must_use]
    pub fn with_access(mut self, access: FieldAccessFlags) -> Self {
        self.access = access;
        self
    }
}

/// Structure data for a single method.
#[derive(Debug, Clone)]
pub struct MethodStructure {
    /// Official method name.
    pub name: String,
    /// JVM method descriptor.
    pub descriptor: String,
    /// JVM access flags.
    pub access: MethodAccessFlags,
    /// True if the method body was synthesized from a lambda expression.
    pub is_lambda: bool,
    /// The real method a compiler-synthesized forwarder delegates to, if any.
    pub bouncer_target: Option<MemberRef>,
}

impl MethodStructure {
    /// Creates method structure data with empty flags.
    pub fn new(name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptor: descriptor.into(),
            access: MethodAccessFlags::empty(),
            is_lambda: false,
            bouncer_target: None,
        }
    }

    /// Sets the access flags, builder style.
    #[must_use]
    pub fn with_access(mut self, access: MethodAccessFlags) -> Self {
        self.access = access;
        self
    }

    /// Marks the method as lambda-derived, builder style.
    #[must_use]
    pub fn with_lambda(mut self) -> Self {
        self.is_lambda = true;
        self
    }

    /// Records the forwarding target, builder style.
    #[must_use]
    pub fn with_bouncer_target(mut self, target: MemberRef) -> Self {
        self.bouncer_target = Some(target);
        self
    }

    /// True if the method is declared static.
    pub fn is_static(&self) -> bool {
        self.access.contains(MethodAccessFlags::STATIC)
    }

    /// True if the method is compiler-synthesized (synthetic or bridge flagged).
    pub fn is_synthetic(&self) -> bool {
        self.access
            .intersects(MethodAccessFlags::SYNTHETIC | MethodAccessFlags::BRIDGE)
    }
}

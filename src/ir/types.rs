//! IR type system and type classification.
//!
//! Every value in the IR carries an [`IrType`]. Analyses never reason about
//! individual widths; they ask which [`TypeClass`] a type belongs to and
//! whether that class is one they track.
//!
//! | Type | Class |
//! |------|-------|
//! | `i1`, `i8` .. `i64`, any `iN` | [`TypeClass::INTEGER`] |
//! | `f32`, `f64` | [`TypeClass::FLOAT`] |
//! | `ptr` | [`TypeClass::POINTER`] |
//! | `void`, `label` | (empty) |

use std::fmt;

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// Classes of value types an analysis can choose to track
    pub struct TypeClass: u8 {
        /// Integers of any width, including the 1-bit boolean
        const INTEGER = 0x01;
        /// Floating point values
        const FLOAT = 0x02;
        /// Pointers
        const POINTER = 0x04;
    }
}

impl Default for TypeClass {
    fn default() -> Self {
        TypeClass::INTEGER
    }
}

/// The type of an IR value.
///
/// # Examples
///
/// ```rust,ignore
/// use rivscope::ir::{IrType, TypeClass};
///
/// assert_eq!(IrType::Int(1).class(), TypeClass::INTEGER);
/// assert!(IrType::Ptr.class().contains(TypeClass::POINTER));
/// assert!(IrType::Void.class().is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IrType {
    /// No value (stores, branches, returns without a value)
    Void,
    /// Integer of the given bit width; `Int(1)` is the boolean type
    Int(u16),
    /// Floating point of the given bit width
    Float(u16),
    /// Opaque pointer
    Ptr,
    /// Basic block label
    Label,
}

impl IrType {
    /// The 1-bit boolean type.
    pub const BOOL: IrType = IrType::Int(1);
    /// 8-bit integer.
    pub const I8: IrType = IrType::Int(8);
    /// 32-bit integer.
    pub const I32: IrType = IrType::Int(32);
    /// 64-bit integer.
    pub const I64: IrType = IrType::Int(64);
    /// 32-bit float.
    pub const F32: IrType = IrType::Float(32);
    /// 64-bit float.
    pub const F64: IrType = IrType::Float(64);

    /// Returns the class this type belongs to.
    #[must_use]
    pub const fn class(&self) -> TypeClass {
        match self {
            IrType::Int(_) => TypeClass::INTEGER,
            IrType::Float(_) => TypeClass::FLOAT,
            IrType::Ptr => TypeClass::POINTER,
            IrType::Void | IrType::Label => TypeClass::empty(),
        }
    }

    /// Returns `true` if this is an integer type of any width, including `i1`.
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, IrType::Int(_))
    }

    /// Returns `true` if this type produces no value.
    #[must_use]
    pub const fn is_void(&self) -> bool {
        matches!(self, IrType::Void)
    }

    /// Returns `true` if a value of this type is a member of `tracked`.
    ///
    /// Types without a class (void, label) are never tracked.
    #[must_use]
    pub fn is_tracked(&self, tracked: TypeClass) -> bool {
        let class = self.class();
        !class.is_empty() && tracked.contains(class)
    }
}

impl fmt::Display for IrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrType::Void => write!(f, "void"),
            IrType::Int(bits) => write!(f, "i{bits}"),
            IrType::Float(32) => write!(f, "float"),
            IrType::Float(64) => write!(f, "double"),
            IrType::Float(bits) => write!(f, "f{bits}"),
            IrType::Ptr => write!(f, "ptr"),
            IrType::Label => write!(f, "label"),
        }
    }
}

/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Sub-objects shared by several protocol records.

use serde::Deserialize;
use serde::Serialize;

/// A location (character range) within a specific source file.
#[derive(Serialize, Deserialize, PartialEq, Debug, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// The file containing the range.
    pub file: String,

    /// The offset of the start of the range.
    pub offset: i32,

    /// The length of the range.
    pub length: i32,

    /// The one-based index of the line containing the first character of the
    /// range.
    pub start_line: i32,

    /// The one-based index of the column containing the first character of
    /// the range.
    pub start_column: i32,

    /// The one-based index of the line containing the character immediately
    /// following the range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_line: Option<i32>,

    /// The one-based index of the column containing the character immediately
    /// following the range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_column: Option<i32>,
}

/// The kind of a declared element.
#[derive(Serialize, Deserialize, PartialEq, Debug, Eq, Clone)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElementKind {
    Class,
    ClassTypeAlias,
    CompilationUnit,
    Constructor,
    ConstructorInvocation,
    Enum,
    EnumConstant,
    Extension,
    Field,
    File,
    Function,
    FunctionInvocation,
    FunctionTypeAlias,
    Getter,
    Label,
    Library,
    LocalVariable,
    Method,
    Mixin,
    Parameter,
    Prefix,
    Setter,
    TopLevelVariable,
    TypeParameter,
    UnitTestGroup,
    UnitTestTest,
    Unknown,
}

/// Modifiers of an element, encoded as a bare integer bitmask on the wire.
#[derive(Serialize, Deserialize, PartialEq, Debug, Eq, Clone)]
#[serde(transparent)]
pub struct ElementFlags(u32);

impl ElementFlags {
    pub const ABSTRACT: u32 = 0x01;
    pub const CONST: u32 = 0x02;
    pub const FINAL: u32 = 0x04;
    pub const TOP_LEVEL_STATIC: u32 = 0x08;
    pub const PRIVATE: u32 = 0x10;
    pub const DEPRECATED: u32 = 0x20;

    pub fn new() -> Self {
        ElementFlags(0)
    }

    pub fn bits(&self) -> u32 {
        self.0
    }

    pub fn with_abstract(self) -> Self {
        ElementFlags(self.0 | Self::ABSTRACT)
    }

    pub fn with_const(self) -> Self {
        ElementFlags(self.0 | Self::CONST)
    }

    pub fn with_final(self) -> Self {
        ElementFlags(self.0 | Self::FINAL)
    }

    pub fn with_top_level_static(self) -> Self {
        ElementFlags(self.0 | Self::TOP_LEVEL_STATIC)
    }

    pub fn with_private(self) -> Self {
        ElementFlags(self.0 | Self::PRIVATE)
    }

    pub fn with_deprecated(self) -> Self {
        ElementFlags(self.0 | Self::DEPRECATED)
    }

    pub fn is_abstract(&self) -> bool {
        self.0 & Self::ABSTRACT != 0
    }

    pub fn is_const(&self) -> bool {
        self.0 & Self::CONST != 0
    }

    pub fn is_final(&self) -> bool {
        self.0 & Self::FINAL != 0
    }

    pub fn is_top_level_static(&self) -> bool {
        self.0 & Self::TOP_LEVEL_STATIC != 0
    }

    pub fn is_private(&self) -> bool {
        self.0 & Self::PRIVATE != 0
    }

    pub fn is_deprecated(&self) -> bool {
        self.0 & Self::DEPRECATED != 0
    }
}

impl Default for ElementFlags {
    fn default() -> Self {
        ElementFlags::new()
    }
}

/// Information about an element: something that can be declared in code.
#[derive(Serialize, Deserialize, PartialEq, Debug, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// The kind of the element.
    pub kind: ElementKind,

    /// The name of the element. This is typically used as the label in the
    /// outline.
    pub name: String,

    /// The location of the name in the declaration. Omitted if the element is
    /// implicit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,

    /// A bitmask containing the modifiers of the element.
    pub flags: ElementFlags,

    /// The parameter list for the element. Omitted if the element is not a
    /// method or function.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<String>,

    /// The return type of the element. Omitted if the element does not have a
    /// declared return type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,

    /// The type parameter list for the element. Omitted if the element does
    /// not have type parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_parameters: Option<String>,

    /// If the element is a type alias, the aliased type. Omitted otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aliased_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::codec::decode;
    use crate::codec::encode;

    #[test]
    fn test_element_kind_wire_names() {
        assert_eq!(encode(&ElementKind::ClassTypeAlias), json!("CLASS_TYPE_ALIAS"));
        assert_eq!(
            decode::<ElementKind>(&json!("UNIT_TEST_GROUP")).unwrap(),
            ElementKind::UnitTestGroup
        );
    }

    #[test]
    fn test_element_flags_builder_and_predicates() {
        let flags = ElementFlags::new().with_abstract().with_deprecated();
        assert!(flags.is_abstract());
        assert!(flags.is_deprecated());
        assert!(!flags.is_private());
        assert_eq!(flags.bits(), 0x21);
    }

    #[test]
    fn test_element_flags_encode_as_bare_integer() {
        let flags = ElementFlags::new().with_const().with_final();
        assert_eq!(encode(&flags), json!(6));
        assert_eq!(decode::<ElementFlags>(&json!(6)).unwrap(), flags);
    }

    #[test]
    fn test_element_round_trip_without_location() {
        let element = Element {
            kind: ElementKind::Method,
            name: "toString".to_owned(),
            location: None,
            flags: ElementFlags::new(),
            parameters: Some("()".to_owned()),
            return_type: Some("String".to_owned()),
            type_parameters: None,
            aliased_type: None,
        };
        let value = encode(&element);
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("location"));
        assert!(!object.contains_key("typeParameters"));
        assert_eq!(decode::<Element>(&value).unwrap(), element);
    }

    #[test]
    fn test_location_optional_end_positions() {
        let location = Location {
            file: "lib/main.dart".to_owned(),
            offset: 10,
            length: 4,
            start_line: 2,
            start_column: 3,
            end_line: None,
            end_column: None,
        };
        assert_eq!(
            encode(&location),
            json!({
                "file": "lib/main.dart",
                "offset": 10,
                "length": 4,
                "startLine": 2,
                "startColumn": 3,
            })
        );
    }
}

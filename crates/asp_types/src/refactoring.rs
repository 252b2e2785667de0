/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Refactoring options and feedback records.
//!
//! The wire format carries options and feedback as bare objects with no type
//! tag embedded in the JSON; which concrete record an object is follows from
//! the refactoring kind named by the surrounding request or response. The
//! [`RefactoringOptions`] and [`RefactoringFeedback`] unions take that kind
//! from the caller and pick the record to decode into.

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::codec::DecodeError;
use crate::codec::decode;
use crate::codec::encode;

/// The kinds of refactorings the server supports. This is the discriminator
/// the dispatch layer supplies when decoding options or feedback.
#[derive(Serialize, Deserialize, PartialEq, Debug, Eq, Clone)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefactoringKind {
    ConvertGetterToMethod,
    ConvertMethodToGetter,
    ExtractLocalVariable,
    ExtractMethod,
    ExtractWidget,
    InlineLocalVariable,
    InlineMethod,
    MoveFile,
    Rename,
}

/// The kind of a method parameter introduced by a refactoring.
#[derive(Serialize, Deserialize, PartialEq, Debug, Eq, Clone)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefactoringMethodParameterKind {
    Required,
    Positional,
    Named,
}

/// A parameter of the method being created by an extraction refactoring.
#[derive(Serialize, Deserialize, PartialEq, Debug, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RefactoringMethodParameter {
    /// The unique identifier of the parameter. Clients may omit this on
    /// newly created parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The kind of the parameter.
    pub kind: RefactoringMethodParameterKind,

    /// The type that should be given to the parameter.
    #[serde(rename = "type")]
    pub type_: String,

    /// The name that should be given to the parameter.
    pub name: String,

    /// The parameter list of the parameter's own function type. Present only
    /// when the parameter is itself a function.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ExtractLocalVariableOptions {
    /// The name that the local variable should be given.
    pub name: String,

    /// True if all occurrences of the expression within the scope in which
    /// the variable will be defined should be replaced by a reference to the
    /// local variable.
    pub extract_all: bool,
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ExtractMethodOptions {
    /// The return type that should be defined for the method.
    pub return_type: String,

    /// True if a getter should be created rather than a method.
    pub create_getter: bool,

    /// The name that the method should be given.
    pub name: String,

    /// The parameters that should be defined for the method.
    pub parameters: Vec<RefactoringMethodParameter>,

    /// True if all occurrences of the expression or statements should be
    /// replaced by an invocation of the method.
    pub extract_all: bool,
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ExtractWidgetOptions {
    /// The name that the widget class should be given.
    pub name: String,
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InlineMethodOptions {
    /// True if the method being inlined should be removed. It is an error if
    /// this field is true and `inlineAll` is false.
    pub delete_source: bool,

    /// True if all invocations of the method should be inlined, or false if
    /// only the invocation site used to create this refactoring should be.
    pub inline_all: bool,
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MoveFileOptions {
    /// The new file path to which the given file is being moved.
    pub new_file: String,
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RenameOptions {
    /// The name that the element should be given.
    pub new_name: String,
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ExtractLocalVariableFeedback {
    /// The offsets of the expressions that cover the specified selection,
    /// from the down-most to the up-most. Omitted when not computed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub covering_expression_offsets: Option<Vec<i32>>,

    /// The lengths of the expressions that cover the specified selection,
    /// from the down-most to the up-most. Omitted when not computed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub covering_expression_lengths: Option<Vec<i32>>,

    /// The proposed names for the local variable, ordered from most to least
    /// appealing.
    pub names: Vec<String>,

    /// The offsets of the expressions that would be replaced by a reference
    /// to the variable.
    pub offsets: Vec<i32>,

    /// The lengths of the expressions that would be replaced by a reference
    /// to the variable. Matches `offsets` pairwise.
    pub lengths: Vec<i32>,
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ExtractMethodFeedback {
    /// The offset to the beginning of the expression or statements that will
    /// be extracted.
    pub offset: i32,

    /// The length of the expression or statements that will be extracted.
    pub length: i32,

    /// The proposed return type for the method.
    pub return_type: String,

    /// The proposed names for the method, ordered from most to least
    /// appealing.
    pub names: Vec<String>,

    /// True if a getter could be created rather than a method.
    pub can_create_getter: bool,

    /// The proposed parameters for the method.
    pub parameters: Vec<RefactoringMethodParameter>,

    /// The offsets of the expressions or statements that would be replaced
    /// by an invocation of the method.
    pub offsets: Vec<i32>,

    /// The lengths of the expressions or statements that would be replaced
    /// by an invocation of the method. Matches `offsets` pairwise.
    pub lengths: Vec<i32>,
}

/// The widget-extraction refactoring computes no feedback beyond its
/// applicability, so the record carries no fields.
#[derive(Serialize, Deserialize, PartialEq, Debug, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ExtractWidgetFeedback {}

#[derive(Serialize, Deserialize, PartialEq, Debug, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InlineLocalVariableFeedback {
    /// The name of the variable being inlined.
    pub name: String,

    /// The number of times the variable occurs.
    pub occurrences: i32,
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InlineMethodFeedback {
    /// The name of the class enclosing the method being inlined. Omitted if
    /// the method is not a class member.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,

    /// The name of the method (or function) being inlined.
    pub method_name: String,

    /// True if the declaration of the method is selected, and all references
    /// should be inlined.
    pub is_declaration: bool,
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RenameFeedback {
    /// The offset to the beginning of the name selected to be renamed, or -1
    /// if the name does not exist yet.
    pub offset: i32,

    /// The length of the name selected to be renamed.
    pub length: i32,

    /// The human-readable description of the kind of element being renamed,
    /// such as "class" or "function type alias".
    pub element_kind_name: String,

    /// The old name of the element before the refactoring.
    pub old_name: String,
}

/// The conflicting flag combination on [`InlineMethodOptions`]: the inlined
/// method cannot be deleted unless every invocation is inlined.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`deleteSource` is true but `inlineAll` is false")]
pub struct ConflictingInlineOptions;

impl InlineMethodOptions {
    /// Check the cross-field rule the codec deliberately leaves to the
    /// component that builds or consumes the refactoring request.
    pub fn validate(&self) -> Result<(), ConflictingInlineOptions> {
        if self.delete_source && !self.inline_all {
            return Err(ConflictingInlineOptions);
        }
        Ok(())
    }
}

/// Options for a refactoring, one variant per kind that defines any.
#[derive(PartialEq, Debug, Eq, Clone)]
pub enum RefactoringOptions {
    ExtractLocalVariable(ExtractLocalVariableOptions),
    ExtractMethod(ExtractMethodOptions),
    ExtractWidget(ExtractWidgetOptions),
    InlineMethod(InlineMethodOptions),
    MoveFile(MoveFileOptions),
    Rename(RenameOptions),
}

impl RefactoringOptions {
    /// Decode the options object for `kind`. Kinds that define no options
    /// decode to `None` and the payload is not inspected.
    pub fn from_json(kind: RefactoringKind, value: &Value) -> Result<Option<Self>, DecodeError> {
        let options = match kind {
            RefactoringKind::ExtractLocalVariable => Self::ExtractLocalVariable(decode(value)?),
            RefactoringKind::ExtractMethod => Self::ExtractMethod(decode(value)?),
            RefactoringKind::ExtractWidget => Self::ExtractWidget(decode(value)?),
            RefactoringKind::InlineMethod => Self::InlineMethod(decode(value)?),
            RefactoringKind::MoveFile => Self::MoveFile(decode(value)?),
            RefactoringKind::Rename => Self::Rename(decode(value)?),
            RefactoringKind::ConvertGetterToMethod
            | RefactoringKind::ConvertMethodToGetter
            | RefactoringKind::InlineLocalVariable => return Ok(None),
        };
        Ok(Some(options))
    }

    /// Encode to the untagged wire object.
    pub fn to_json(&self) -> Value {
        match self {
            Self::ExtractLocalVariable(options) => encode(options),
            Self::ExtractMethod(options) => encode(options),
            Self::ExtractWidget(options) => encode(options),
            Self::InlineMethod(options) => encode(options),
            Self::MoveFile(options) => encode(options),
            Self::Rename(options) => encode(options),
        }
    }

    /// The refactoring kind these options belong to.
    pub fn kind(&self) -> RefactoringKind {
        match self {
            Self::ExtractLocalVariable(_) => RefactoringKind::ExtractLocalVariable,
            Self::ExtractMethod(_) => RefactoringKind::ExtractMethod,
            Self::ExtractWidget(_) => RefactoringKind::ExtractWidget,
            Self::InlineMethod(_) => RefactoringKind::InlineMethod,
            Self::MoveFile(_) => RefactoringKind::MoveFile,
            Self::Rename(_) => RefactoringKind::Rename,
        }
    }
}

/// Feedback computed while creating a refactoring, one variant per kind that
/// produces any.
#[derive(PartialEq, Debug, Eq, Clone)]
pub enum RefactoringFeedback {
    ExtractLocalVariable(ExtractLocalVariableFeedback),
    ExtractMethod(ExtractMethodFeedback),
    ExtractWidget(ExtractWidgetFeedback),
    InlineLocalVariable(InlineLocalVariableFeedback),
    InlineMethod(InlineMethodFeedback),
    Rename(RenameFeedback),
}

impl RefactoringFeedback {
    /// Decode the feedback object for `kind`. Kinds that produce no feedback
    /// decode to `None` and the payload is not inspected.
    pub fn from_json(kind: RefactoringKind, value: &Value) -> Result<Option<Self>, DecodeError> {
        let feedback = match kind {
            RefactoringKind::ExtractLocalVariable => Self::ExtractLocalVariable(decode(value)?),
            RefactoringKind::ExtractMethod => Self::ExtractMethod(decode(value)?),
            RefactoringKind::ExtractWidget => Self::ExtractWidget(decode(value)?),
            RefactoringKind::InlineLocalVariable => Self::InlineLocalVariable(decode(value)?),
            RefactoringKind::InlineMethod => Self::InlineMethod(decode(value)?),
            RefactoringKind::Rename => Self::Rename(decode(value)?),
            RefactoringKind::ConvertGetterToMethod
            | RefactoringKind::ConvertMethodToGetter
            | RefactoringKind::MoveFile => return Ok(None),
        };
        Ok(Some(feedback))
    }

    /// Encode to the untagged wire object.
    pub fn to_json(&self) -> Value {
        match self {
            Self::ExtractLocalVariable(feedback) => encode(feedback),
            Self::ExtractMethod(feedback) => encode(feedback),
            Self::ExtractWidget(feedback) => encode(feedback),
            Self::InlineLocalVariable(feedback) => encode(feedback),
            Self::InlineMethod(feedback) => encode(feedback),
            Self::Rename(feedback) => encode(feedback),
        }
    }

    /// The refactoring kind this feedback belongs to.
    pub fn kind(&self) -> RefactoringKind {
        match self {
            Self::ExtractLocalVariable(_) => RefactoringKind::ExtractLocalVariable,
            Self::ExtractMethod(_) => RefactoringKind::ExtractMethod,
            Self::ExtractWidget(_) => RefactoringKind::ExtractWidget,
            Self::InlineLocalVariable(_) => RefactoringKind::InlineLocalVariable,
            Self::InlineMethod(_) => RefactoringKind::InlineMethod,
            Self::Rename(_) => RefactoringKind::Rename,
        }
    }
}

/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Completion suggestion records.

use serde::Deserialize;
use serde::Serialize;

use crate::common::Element;

/// The kind of a completion suggestion.
#[derive(Serialize, Deserialize, PartialEq, Debug, Eq, Clone)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompletionSuggestionKind {
    /// A list of arguments for the method or function being invoked.
    ArgumentList,
    Import,
    /// The name of an identifier: a class name, field, local variable and the
    /// like.
    Identifier,
    /// An invocation of a method or function, completed with both the name
    /// and the argument list template.
    Invocation,
    /// A keyword of the language.
    Keyword,
    /// A named argument for the current call site.
    NamedArgument,
    OptionalArgument,
    Override,
    PackageName,
    Parameter,
}

/// A suggestion for how to complete partially entered text. Many of the
/// fields are optional, depending on the kind of element being suggested.
#[derive(Serialize, Deserialize, PartialEq, Debug, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CompletionSuggestion {
    /// The kind of element being suggested.
    pub kind: CompletionSuggestionKind,

    /// The relevance of this suggestion: a higher number means a higher
    /// relevance.
    pub relevance: i32,

    /// The identifier to be inserted if the suggestion is selected. If the
    /// suggestion is for a method or function, the client might want to
    /// additionally insert a template for the parameters; the information
    /// required to do so is in other fields.
    pub completion: String,

    /// Text to be displayed in, for example, a completion pop-up. Present
    /// only if the displayed text should differ from the completion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_text: Option<String>,

    /// The offset of the start of the text to be replaced. If supplied, this
    /// is used in preference to the offset provided on the containing
    /// completion results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replacement_offset: Option<i32>,

    /// The length of the text to be replaced. May be provided independently
    /// of `replacementOffset`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replacement_length: Option<i32>,

    /// The offset, relative to the beginning of the completion, of where the
    /// selection should be placed after insertion.
    pub selection_offset: i32,

    /// The number of characters that should be selected after insertion.
    pub selection_length: i32,

    /// True if the suggested element is deprecated.
    pub is_deprecated: bool,

    /// True if the element is not known to be valid for the target. This
    /// happens if the type of the target is dynamic.
    pub is_potential: bool,

    /// An abbreviated version of the documentation associated with the
    /// element being suggested. Omitted if there is none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_summary: Option<String>,

    /// The documentation associated with the element being suggested.
    /// Omitted if there is none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_complete: Option<String>,

    /// The class that declares the element being suggested. Omitted if the
    /// suggested element is not a member of a class.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declaring_type: Option<String>,

    /// A default string for use in generating argument list source contents
    /// on the client side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_argument_list_string: Option<String>,

    /// Pairs of offsets and lengths describing `defaultArgumentListString`
    /// text ranges suitable for use by clients to set up linked edits of
    /// default argument source contents. For the argument list string
    /// `x, y`, the ranges `[0, 1, 3, 1]` mark the `x` and the `y`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_argument_list_text_ranges: Option<Vec<i32>>,

    /// Information about the element reference being suggested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<Element>,

    /// The return type of the getter, function or method, or the type of the
    /// field, being suggested. Omitted for other element kinds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,

    /// The names of the parameters of the function or method being
    /// suggested. Omitted if the suggested element is not a setter, function
    /// or method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_names: Option<Vec<String>>,

    /// The types of the parameters of the function or method being
    /// suggested. Omitted if `parameterNames` is omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_types: Option<Vec<String>>,

    /// The number of required parameters for the function or method being
    /// suggested. Omitted if `parameterNames` is omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_parameter_count: Option<i32>,

    /// True if the function or method being suggested has at least one named
    /// parameter. Omitted if `parameterNames` is omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_named_parameters: Option<bool>,

    /// The name of the optional parameter being suggested. Omitted if the
    /// suggestion is not the addition of an optional argument within an
    /// argument list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_name: Option<String>,

    /// The type of the parameter being suggested. Omitted if `parameterName`
    /// is omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_type: Option<String>,

    /// The URI of a library that provides the suggested element, or that
    /// could be imported to make it accessible. Omitted for locally declared
    /// elements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library_uri: Option<String>,

    /// True if the suggestion is for an element from a not yet imported
    /// library. Omitted if the element is declared locally or its library is
    /// already imported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_not_imported: Option<bool>,
}

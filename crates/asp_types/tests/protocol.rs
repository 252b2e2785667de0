/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! End-to-end scenarios over the public API: what a dispatch layer does with
//! a completion response or a refactoring request once the transport has
//! parsed the bytes.

use asp_types::CompletionSuggestion;
use asp_types::CompletionSuggestionKind;
use asp_types::DecodeErrorKind;
use asp_types::Element;
use asp_types::ElementFlags;
use asp_types::ElementKind;
use asp_types::InlineMethodOptions;
use asp_types::RefactoringFeedback;
use asp_types::RefactoringKind;
use asp_types::RefactoringOptions;
use asp_types::decode;
use asp_types::decode_list;
use asp_types::encode;
use pretty_assertions::assert_eq;
use serde_json::Value;
use serde_json::json;

fn identifier_suggestion() -> CompletionSuggestion {
    CompletionSuggestion {
        kind: CompletionSuggestionKind::Identifier,
        relevance: 500,
        completion: "foo".to_owned(),
        display_text: None,
        replacement_offset: None,
        replacement_length: None,
        selection_offset: 3,
        selection_length: 0,
        is_deprecated: false,
        is_potential: false,
        doc_summary: None,
        doc_complete: None,
        declaring_type: None,
        default_argument_list_string: None,
        default_argument_list_text_ranges: None,
        element: None,
        return_type: None,
        parameter_names: None,
        parameter_types: None,
        required_parameter_count: None,
        has_named_parameters: None,
        parameter_name: None,
        parameter_type: None,
        library_uri: None,
        is_not_imported: None,
    }
}

#[test]
fn test_completion_response_round_trip() {
    let suggestion = identifier_suggestion();
    let value = encode(&suggestion);
    assert_eq!(
        value,
        json!({
            "kind": "IDENTIFIER",
            "relevance": 500,
            "completion": "foo",
            "selectionOffset": 3,
            "selectionLength": 0,
            "isDeprecated": false,
            "isPotential": false,
        })
    );
    assert_eq!(value.as_object().unwrap().len(), 7);
    assert_eq!(decode::<CompletionSuggestion>(&value).unwrap(), suggestion);
}

#[test]
fn test_completion_results_list_decodes_absent_as_empty() {
    // A response with no results entry and one with an explicit null both
    // mean "no suggestions", not a malformed response.
    let response = json!({"id": "1", "result": {}});
    let results = response["result"].get("results");
    assert_eq!(
        decode_list::<CompletionSuggestion>(results).unwrap(),
        Vec::new()
    );

    let response = json!({"id": "2", "result": {"results": null}});
    let results = response["result"].get("results");
    assert_eq!(
        decode_list::<CompletionSuggestion>(results).unwrap(),
        Vec::new()
    );
}

#[test]
fn test_completion_results_list_round_trip() {
    let mut second = identifier_suggestion();
    second.kind = CompletionSuggestionKind::Invocation;
    second.completion = "bar".to_owned();
    second.default_argument_list_string = Some("x, y".to_owned());
    second.default_argument_list_text_ranges = Some(vec![0, 1, 3, 1]);
    second.element = Some(Element {
        kind: ElementKind::Function,
        name: "bar".to_owned(),
        location: None,
        flags: ElementFlags::new().with_deprecated(),
        parameters: Some("(int x, int y)".to_owned()),
        return_type: Some("void".to_owned()),
        type_parameters: None,
        aliased_type: None,
    });

    let suggestions = vec![identifier_suggestion(), second];
    let value = encode(&suggestions);
    assert_eq!(value[1]["defaultArgumentListTextRanges"], json!([0, 1, 3, 1]));

    let decoded: Vec<CompletionSuggestion> = decode_list(Some(&value)).unwrap();
    assert_eq!(decoded, suggestions);
}

#[test]
fn test_malformed_nested_element_is_reported_with_path() {
    let mut value = encode(&identifier_suggestion());
    value["element"] = json!({
        "kind": "FUNCTION",
        "name": "bar",
        "flags": "not a bitmask",
    });
    let err = decode::<CompletionSuggestion>(&value).unwrap_err();
    assert!(matches!(err.kind(), DecodeErrorKind::TypeMismatch { .. }));
    assert_eq!(err.path().to_string(), "element.flags");
}

#[test]
fn test_refactoring_request_flow() {
    // The dispatch layer reads the kind from the request itself, then hands
    // the untagged options object plus that kind to the union decoder.
    let request = json!({
        "kind": "INLINE_METHOD",
        "file": "lib/main.dart",
        "offset": 42,
        "length": 6,
        "options": {"deleteSource": false, "inlineAll": true},
    });
    let kind: RefactoringKind = decode(&request["kind"]).unwrap();
    let options = RefactoringOptions::from_json(kind, &request["options"])
        .unwrap()
        .unwrap();
    let RefactoringOptions::InlineMethod(inline) = &options else {
        panic!("wrong options variant: {options:?}");
    };
    inline.validate().unwrap();
    assert!(!inline.delete_source);
    assert_eq!(options.to_json(), request["options"]);
}

#[test]
fn test_refactoring_feedback_flow() {
    let response_feedback = json!({
        "offset": 20,
        "length": 5,
        "elementKindName": "class",
        "oldName": "Shape",
    });
    let feedback = RefactoringFeedback::from_json(RefactoringKind::Rename, &response_feedback)
        .unwrap()
        .unwrap();
    assert_eq!(feedback.kind(), RefactoringKind::Rename);
    assert_eq!(feedback.to_json(), response_feedback);
}

#[test]
fn test_conflicting_inline_options_decode_but_fail_validation() {
    // The codec accepts the combination; the semantic rule is the caller's.
    let value = json!({"deleteSource": true, "inlineAll": false});
    let options: InlineMethodOptions = decode(&value).unwrap();
    assert!(options.validate().is_err());
}

#[test]
fn test_debug_rendering_lists_unset_fields() {
    let rendered = format!("{:?}", identifier_suggestion());
    assert!(rendered.contains("kind: Identifier"));
    assert!(rendered.contains("display_text: None"));
    assert!(rendered.contains("element: None"));
}

#[test]
fn test_required_field_failure_at_top_level() {
    let err = decode::<CompletionSuggestion>(&json!({
        "kind": "IDENTIFIER",
        "relevance": 500,
    }))
    .unwrap_err();
    assert_eq!(
        err.kind(),
        &DecodeErrorKind::MissingRequiredField {
            field: "completion".to_owned()
        }
    );
}

#[test]
fn test_encode_never_emits_null_for_unset_fields() {
    let value = encode(&identifier_suggestion());
    assert!(
        value
            .as_object()
            .unwrap()
            .values()
            .all(|v| *v != Value::Null)
    );
}

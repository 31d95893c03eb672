mod common;

use common::{ScriptedVision, bbox};
use labeler::{LabelError, LabelPalette, NO_OBJECTS_MESSAGE, label};

const IMAGE: &str = "data:image/png;base64,iVBORw0KGgo=";

#[tokio::test]
async fn duplicate_labels_share_one_counter() {
    let vision = ScriptedVision::answering("cat, cat, dog")
        .then_detect(Ok(vec![bbox(0.0, 0.0, 0.2, 0.2), bbox(0.3, 0.3, 0.5, 0.5)]))
        .then_detect(Ok(vec![]))
        .then_detect(Ok(vec![bbox(0.6, 0.6, 0.9, 0.9)]));

    let result = label(&vision, IMAGE, "").await.unwrap();

    assert_eq!(vision.detect_calls(), vec!["cat", "cat", "dog"]);
    assert_eq!(
        result.discovered_objects.as_deref(),
        Some(&["cat".to_string(), "cat".to_string(), "dog".to_string()][..])
    );
    let indices: Vec<_> = result.objects.iter().map(|b| b.original_index).collect();
    assert_eq!(indices, vec![0, 1, 2]);

    let palette = LabelPalette::from_boxes(&result.objects);
    let colors: Vec<_> = result.objects.iter().map(|b| palette.color_for(b)).collect();
    assert_eq!(colors[0], colors[1]);
    assert_ne!(colors[0], colors[2]);
    assert_eq!(result.original_image, IMAGE);
    assert_eq!(result.message, None);
}

#[tokio::test]
async fn failed_detection_is_skipped() {
    let vision = ScriptedVision::answering("car, sign, dog")
        .then_detect(Ok(vec![bbox(0.1, 0.1, 0.2, 0.2)]))
        .then_detect(Err(502))
        .then_detect(Ok(vec![bbox(0.5, 0.5, 0.7, 0.7)]));

    let result = label(&vision, IMAGE, "").await.unwrap();

    assert_eq!(vision.detect_calls(), vec!["car", "sign", "dog"]);
    let labels: Vec<_> = result.objects.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["car", "dog"]);
    assert_eq!(result.objects[1].original_index, 1);
}

#[tokio::test]
async fn null_answer_skips_detection() {
    for answer in ["null", "NULL", " Null ", "none of those", "no objects found"] {
        let vision = ScriptedVision::answering(answer);
        let result = label(&vision, IMAGE, "buttons").await.unwrap();
        assert!(vision.detect_calls().is_empty(), "{answer}");
        assert!(result.objects.is_empty());
        assert_eq!(result.message.as_deref(), Some(NO_OBJECTS_MESSAGE));
        assert_eq!(result.discovered_objects, None);
    }
}

#[tokio::test]
async fn empty_answer_finds_nothing() {
    let vision = ScriptedVision::answering("");
    let result = label(&vision, IMAGE, "").await.unwrap();
    assert!(vision.detect_calls().is_empty());
    assert_eq!(result.message.as_deref(), Some(NO_OBJECTS_MESSAGE));
}

#[tokio::test]
async fn discovery_failure_aborts() {
    let vision = ScriptedVision::failing_query(503);
    let err = label(&vision, IMAGE, "").await.unwrap_err();
    assert!(matches!(err, LabelError::Discovery(_)));
    assert!(err.to_string().contains("503"));
    assert!(vision.detect_calls().is_empty());
}

#[tokio::test]
async fn prompt_shapes_the_question() {
    let vision = ScriptedVision::answering("null");
    label(&vision, IMAGE, "cars and signs").await.unwrap();
    label(&vision, IMAGE, "cars").await.unwrap();
    label(&vision, IMAGE, "").await.unwrap();

    let questions = vision.questions.lock().unwrap().clone();
    assert!(questions[0].contains("Include both types of objects mentioned"));
    assert!(questions[1].starts_with("List all cars you can see"));
    assert!(questions[2].starts_with("List all the objects you can see"));
}

//! Tests for video reference parsing and output naming

use ytcomments::crawler::url::extract_video_id;
use ytcomments::utils::default_output_path;

#[test]
fn test_reference_forms() {
    let cases = [
        ("dQw4w9WgXcQ", "dQw4w9WgXcQ"),
        ("https://youtu.be/dQw4w9WgXcQ", "dQw4w9WgXcQ"),
        ("https://youtu.be/dQw4w9WgXcQ?t=30", "dQw4w9WgXcQ"),
        ("https://www.youtube.com/watch?v=dQw4w9WgXcQ", "dQw4w9WgXcQ"),
        ("https://www.youtube.com/watch?v=dQw4w9WgXcQ&list=PL1&index=2", "dQw4w9WgXcQ"),
        ("https://music.youtube.com/watch?v=dQw4w9WgXcQ", "dQw4w9WgXcQ"),
        ("https://www.youtube.com/shorts/dQw4w9WgXcQ", "dQw4w9WgXcQ"),
        ("https://www.youtube.com/embed/dQw4w9WgXcQ", "dQw4w9WgXcQ"),
        ("https://www.youtube.com/live/dQw4w9WgXcQ?feature=share", "dQw4w9WgXcQ"),
    ];

    for (input, expected) in cases {
        assert_eq!(extract_video_id(input), expected, "input: {input}");
    }
}

#[test]
fn test_unknown_forms_pass_through() {
    for input in ["https://vimeo.com/12345", "https://www.youtube.com/feed/trending", "not a url at all"] {
        assert_eq!(extract_video_id(input), input);
    }
}

#[test]
fn test_default_output_path_uses_id() {
    let id = extract_video_id("https://youtu.be/dQw4w9WgXcQ");
    assert_eq!(
        default_output_path(&id),
        std::path::PathBuf::from("dQw4w9WgXcQ.json")
    );
}

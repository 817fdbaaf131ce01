use quickcheck_macros::quickcheck;

use crate::codec::{
    ValueCodec,
    composite::{
        ArrayCodec, CastCodec, CollectionCodec, ConvertedCodec, NullCodec,
        NullableCollectionCodec,
    },
    primitives::{I32Codec, I64Codec, StringCodec},
};

#[test]
fn collection_roundtrips() {
    let codec = CollectionCodec::new(I32Codec);
    for values in [vec![], vec![1], vec![1, 2, 3]] {
        let json = codec.to_json_string(&values).unwrap();
        assert_eq!(codec.from_json_str(&json, None).unwrap(), values);
    }
}

#[test]
fn empty_collection_is_an_array_not_null() {
    let codec = CollectionCodec::new(I32Codec);
    assert_eq!(codec.to_json_string(&vec![]).unwrap(), "[]");
}

#[test]
fn nullable_collection_preserves_nulls_and_order() {
    let codec = NullableCollectionCodec::new(I32Codec);
    let values = vec![Some(1), None, Some(3), None];
    let json = codec.to_json_string(&values).unwrap();
    assert_eq!(json, "[1,null,3,null]");
    assert_eq!(codec.from_json_str(&json, None).unwrap(), values);
}

#[test]
fn nonnullable_collection_drops_explicit_nulls() {
    // Lenient by design: persisted documents may carry nulls in arrays whose
    // element type cannot be null.
    let codec = CollectionCodec::new(I32Codec);
    assert_eq!(codec.from_json_str("[1, null, 2]", None).unwrap(), vec![1, 2]);
}

#[test]
fn existing_instance_is_cleared_and_reused() {
    let codec = CollectionCodec::new(I32Codec);
    let existing = vec![9, 9, 9, 9];
    let read = codec.from_json_str("[1,2]", Some(existing)).unwrap();
    assert_eq!(read, vec![1, 2]);
}

#[test]
fn array_codec_materializes_boxed_slice() {
    let codec = ArrayCodec::new(I32Codec);
    let read: Box<[i32]> = codec.from_json_str("[4,5,6]", None).unwrap();
    assert_eq!(&*read, &[4, 5, 6]);
    assert_eq!(codec.to_json_string(&read).unwrap(), "[4,5,6]");
}

#[test]
fn collections_nest() {
    let codec = CollectionCodec::new(CollectionCodec::new(I32Codec));
    let values = vec![vec![1], vec![], vec![2, 3]];
    let json = codec.to_json_string(&values).unwrap();
    assert_eq!(json, "[[1],[],[2,3]]");
    assert_eq!(codec.from_json_str(&json, None).unwrap(), values);
}

#[test]
fn comments_between_elements_are_skipped() {
    let codec = CollectionCodec::new(I32Codec);
    assert_eq!(
        codec.from_json_str("[1 /* mid */, 2, // tail\n 3]", None).unwrap(),
        vec![1, 2, 3]
    );
}

#[quickcheck]
fn any_i64_collection_roundtrips(values: Vec<i64>) -> bool {
    let codec = CollectionCodec::new(I64Codec);
    let json = codec.to_json_string(&values).unwrap();
    codec.from_json_str(&json, None).unwrap() == values
}

#[derive(Debug, Clone, PartialEq)]
struct Label(String);

impl From<String> for Label {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<Label> for String {
    fn from(value: Label) -> Self {
        value.0
    }
}

#[test]
fn cast_codec_adapts_declared_type() {
    let codec: CastCodec<StringCodec, Label> = CastCodec::new(StringCodec);
    let value = Label("shelf".to_owned());
    let json = codec.to_json_string(&value).unwrap();
    assert_eq!(json, "\"shelf\"");
    assert_eq!(codec.from_json_str(&json, None).unwrap(), value);
}

#[test]
fn converted_codec_runs_the_conversion_pair() {
    let codec = ConvertedCodec::new(
        I64Codec,
        |d: &std::time::Duration| i64::try_from(d.as_millis()).unwrap_or(i64::MAX),
        |ms| std::time::Duration::from_millis(u64::try_from(ms).unwrap_or(0)),
    );
    let value = std::time::Duration::from_millis(1250);
    let json = codec.to_json_string(&value).unwrap();
    assert_eq!(json, "1250");
    assert_eq!(codec.from_json_str(&json, None).unwrap(), value);
}

#[test]
fn converted_codec_composes_with_collections() {
    let codec = CollectionCodec::new(ConvertedCodec::new(
        I64Codec,
        |d: &std::time::Duration| i64::try_from(d.as_millis()).unwrap_or(i64::MAX),
        |ms| std::time::Duration::from_millis(u64::try_from(ms).unwrap_or(0)),
    ));
    let values = vec![
        std::time::Duration::from_millis(1),
        std::time::Duration::from_millis(2),
    ];
    let json = codec.to_json_string(&values).unwrap();
    assert_eq!(codec.from_json_str(&json, None).unwrap(), values);
}

#[test]
fn null_codec_always_null() {
    let codec: NullCodec<String> = NullCodec::new();
    assert_eq!(codec.to_json_string(&None).unwrap(), "null");
    assert_eq!(codec.from_json_str("null", None).unwrap(), None);
}

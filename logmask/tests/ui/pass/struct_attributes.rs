use std::{collections::BTreeMap, marker::PhantomData};

use logmask::{FieldRule, Mask, MaskingEngine, MaskingOptions};

struct NotMaskable;

#[derive(Mask)]
struct Payment<M> {
    #[mask(prefix = 3, suffix = 3)]
    iban: String,
    #[mask(exclude)]
    cvv: Option<String>,
    #[mask(field_name = "CardHolder")]
    holder: String,
    #[mask(prefix = 1, field_name = "pin")]
    pin_code: String,
    #[mask]
    reference: Box<String>,
    #[mask(skip)]
    handle: NotMaskable,
    metadata: BTreeMap<String, String>,
    r#type: String,
    _marker: PhantomData<M>,
}

#[derive(Mask)]
struct Wrapper(#[mask(suffix = 4)] String, u64);

fn main() {
    let engine = MaskingEngine::new(
        MaskingOptions::default().with_rule(FieldRule::new("CardHolder").keep(1, 0)),
    );
    let mut payment = Payment::<NotMaskable> {
        iban: "TR330006100519786457841326".to_string(),
        cvv: Some("123".to_string()),
        holder: "Jane Doe".to_string(),
        pin_code: "9876".to_string(),
        reference: Box::new("ref-1".to_string()),
        handle: NotMaskable,
        metadata: BTreeMap::new(),
        r#type: "card".to_string(),
        _marker: PhantomData,
    };
    engine.mask(&mut payment);
    assert_eq!(payment.holder, "J*******");
    assert_eq!(payment.pin_code, "9***");

    let mut wrapper = Wrapper("4111111111111111".to_string(), 7);
    engine.mask(&mut wrapper);
    assert_eq!(wrapper.0, "************1111");
}

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use selection_gate::*;

fn checkbox_page() -> (Rc<MemoryDocument>, [NodeId; 2], NodeId) {
    let doc = Rc::new(MemoryDocument::new());
    let a = doc.push_checkbox("UserAnswer");
    let b = doc.push_checkbox("UserAnswer");
    let submit = doc.push_button(DEFAULT_SUBMIT_ID);
    (doc, [a, b], submit)
}

fn radio_page() -> (Rc<MemoryDocument>, [NodeId; 3], NodeId) {
    let doc = Rc::new(MemoryDocument::new());
    let a = doc.push_radio("UserAnswer");
    let b = doc.push_radio("UserAnswer");
    let c = doc.push_radio("UserAnswer");
    let submit = doc.push_submit_input(DEFAULT_SUBMIT_ID);
    (doc, [a, b, c], submit)
}

#[test]
fn checkbox_toggle_enables_then_disables() {
    let (doc, [first, _], submit) = checkbox_page();
    let _gate = SelectionGate::bind(doc.clone(), GateConfig::new(SubmitMatch::Button));

    doc.click(first);
    assert!(doc.checked(first));
    assert!(!doc.disabled(submit));

    doc.click(first);
    assert!(!doc.checked(first));
    assert!(doc.disabled(submit));
}

#[test]
fn any_checked_checkbox_keeps_submit_enabled() {
    let (doc, [first, second], submit) = checkbox_page();
    let _gate = SelectionGate::bind(doc.clone(), GateConfig::new(SubmitMatch::Button));

    doc.click(first);
    doc.click(second);
    doc.click(first);
    assert!(doc.checked(second));
    assert!(!doc.disabled(submit));

    doc.click(second);
    assert!(doc.disabled(submit));
}

#[test]
fn radio_selection_stays_enabled_when_moved() {
    let (doc, [_, second, third], submit) = radio_page();
    let _gate = SelectionGate::bind(doc.clone(), GateConfig::new(SubmitMatch::Input));

    doc.click(second);
    assert!(!doc.disabled(submit));

    doc.click(third);
    assert!(!doc.checked(second));
    assert!(doc.checked(third));
    assert!(!doc.disabled(submit));
}

#[test]
fn per_group_ignores_the_other_group() {
    let doc = Rc::new(MemoryDocument::new());
    let checkbox = doc.push_checkbox("extra");
    let radio = doc.push_radio("UserAnswer");
    let submit = doc.push_button(DEFAULT_SUBMIT_ID);
    let _gate = SelectionGate::bind(doc.clone(), GateConfig::new(SubmitMatch::Button));

    doc.click(radio);
    assert!(!doc.disabled(submit));

    // check then uncheck the box: only the checkbox group is consulted, so the radio selection does not count
    doc.click(checkbox);
    assert!(!doc.disabled(submit));
    doc.click(checkbox);
    assert!(doc.checked(radio));
    assert!(doc.disabled(submit));
}

#[test]
fn combined_consults_both_groups() {
    let doc = Rc::new(MemoryDocument::new());
    let checkbox = doc.push_checkbox("extra");
    let radio = doc.push_radio("UserAnswer");
    let submit = doc.push_button(DEFAULT_SUBMIT_ID);
    let _gate = SelectionGate::bind(
        doc.clone(),
        GateConfig::new(SubmitMatch::Button).evaluation(Evaluation::Combined),
    );

    doc.click(radio);
    doc.click(checkbox);
    doc.click(checkbox);
    assert!(!doc.disabled(submit));
}

#[test]
fn no_inputs_leaves_markup_default() {
    let doc = Rc::new(MemoryDocument::new());
    let submit = doc.push(
        MemoryElement::new("button")
            .with_id(DEFAULT_SUBMIT_ID)
            .disabled(true),
    );

    let gate = SelectionGate::bind(doc.clone(), GateConfig::new(SubmitMatch::Button));
    assert!(gate.is_inert());
    assert_eq!(gate.listener_count(), 0);
    assert_eq!(doc.total_listeners(), 0);

    doc.click(submit);
    assert!(doc.disabled(submit));
}

#[test]
fn state_is_not_synced_at_bind_by_default() {
    let doc = Rc::new(MemoryDocument::new());
    let first = doc.push_checkbox("UserAnswer");
    let submit = doc.push(
        MemoryElement::new("button")
            .with_id(DEFAULT_SUBMIT_ID)
            .disabled(true),
    );
    doc.set_checked(first, true);

    let _gate = SelectionGate::bind(doc.clone(), GateConfig::new(SubmitMatch::Button));
    assert!(doc.disabled(submit));

    let other = Rc::new(MemoryDocument::new());
    other.push_checkbox("UserAnswer");
    let other_submit = other.push_button(DEFAULT_SUBMIT_ID);
    let _other_gate = SelectionGate::bind(other.clone(), GateConfig::new(SubmitMatch::Button));
    assert!(!other.disabled(other_submit));
}

#[test]
fn sync_on_bind_reads_existing_selection() {
    let (doc, [first, _], submit) = checkbox_page();
    let _gate = SelectionGate::bind(
        doc.clone(),
        GateConfig::new(SubmitMatch::Button).sync_on_bind(true),
    );
    assert!(doc.disabled(submit));

    let (restored, [_, second], restored_submit) = checkbox_page();
    restored.set_checked(second, true);
    let _restored_gate = SelectionGate::bind(
        restored.clone(),
        GateConfig::new(SubmitMatch::Button).sync_on_bind(true),
    );
    assert!(!restored.disabled(restored_submit));

    doc.click(first);
    assert!(!doc.disabled(submit));
}

#[test]
fn sync_on_bind_leaves_a_page_without_inputs_alone() {
    let doc = Rc::new(MemoryDocument::new());
    let submit = doc.push_button(DEFAULT_SUBMIT_ID);

    let gate = SelectionGate::bind(
        doc.clone(),
        GateConfig::new(SubmitMatch::Button).sync_on_bind(true),
    );
    assert!(gate.is_inert());
    assert!(!doc.disabled(submit));
}

#[test]
fn mismatched_submit_type_is_a_no_op() {
    let (doc, [first, _], submit) = checkbox_page();
    let gate = SelectionGate::bind(doc.clone(), GateConfig::new(SubmitMatch::Input));
    assert!(!gate.has_submit_control());

    doc.click(first);
    doc.click(first);
    assert!(!doc.disabled(submit));
}

#[test]
fn any_matches_button_or_input() {
    let (buttons, _, _) = checkbox_page();
    let gate = SelectionGate::bind(buttons, GateConfig::new(SubmitMatch::Any));
    assert!(gate.has_submit_control());

    let (radios, [a, _, _], submit) = radio_page();
    let gate = SelectionGate::bind(radios.clone(), GateConfig::new(SubmitMatch::Any));
    assert!(gate.has_submit_control());
    radios.click(a);
    assert!(!radios.disabled(submit));
}

#[test]
fn custom_submit_id() {
    let doc = Rc::new(MemoryDocument::new());
    let checkbox = doc.push_checkbox("UserAnswer");
    let default = doc.push_button(DEFAULT_SUBMIT_ID);
    let next = doc.push_button("Next");
    let _gate = SelectionGate::bind(
        doc.clone(),
        GateConfig::new(SubmitMatch::Button).submit_id("Next"),
    );

    doc.click(checkbox);
    doc.click(checkbox);
    assert!(doc.disabled(next));
    assert!(!doc.disabled(default));
}

#[test]
fn dropping_the_binding_unbinds() {
    let (doc, [first, second], submit) = checkbox_page();
    let gate = SelectionGate::bind(doc.clone(), GateConfig::new(SubmitMatch::Button));
    assert_eq!(gate.listener_count(), 2);
    assert_eq!(doc.listener_count(first), 1);
    assert_eq!(doc.listener_count(second), 1);

    gate.dispose();
    assert_eq!(doc.total_listeners(), 0);

    doc.click(first);
    assert!(doc.checked(first));
    assert!(!doc.disabled(submit));
    doc.click(first);
    assert!(!doc.disabled(submit));
}

#[test]
fn inputs_added_after_bind_are_not_watched() {
    let (doc, _, submit) = checkbox_page();
    let gate = SelectionGate::bind(doc.clone(), GateConfig::new(SubmitMatch::Button));
    let late = doc.push_checkbox("UserAnswer");

    doc.click(late);
    assert_eq!(gate.checkbox_count(), 2);
    assert_eq!(doc.listener_count(late), 0);
    assert!(!doc.disabled(submit));
}

#[test]
fn observer_sees_every_evaluation() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = seen.clone();

    let (doc, [first, second], _) = checkbox_page();
    let radio = doc.push_radio("UserAnswer");
    let _gate = SelectionGate::bind(
        doc.clone(),
        GateConfig::new(SubmitMatch::Button).on_evaluate(move |state| log.borrow_mut().push(*state)),
    );

    doc.click(first);
    doc.click(second);
    doc.click(first);
    doc.click(radio);

    let disabled: Vec<_> = seen.borrow().iter().map(GateState::disabled).collect();
    assert_eq!(disabled, vec![false, false, false, false]);
    assert_eq!(
        seen.borrow().last().copied(),
        Some(GateState {
            source: GateSource::Click(InputKind::Radio),
            has_selection: true,
            submit_found: true,
        })
    );
    assert_eq!(seen.borrow().len(), 4);
}

#[test]
fn observer_reports_missing_submit_control() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = seen.clone();

    let doc = Rc::new(MemoryDocument::new());
    let checkbox = doc.push_checkbox("UserAnswer");
    let _gate = SelectionGate::bind(
        doc.clone(),
        GateConfig::new(SubmitMatch::Button).on_evaluate(move |state| log.borrow_mut().push(*state)),
    );

    doc.click(checkbox);
    assert_eq!(
        *seen.borrow(),
        vec![GateState {
            source: GateSource::Click(InputKind::Checkbox),
            has_selection: true,
            submit_found: false,
        }]
    );
}

#[test]
fn evaluate_and_sync_without_clicks() {
    let doc = Rc::new(MemoryDocument::new());
    let checkbox = doc.push_checkbox("extra");
    let radio = doc.push_radio("UserAnswer");
    let submit = doc.push_button(DEFAULT_SUBMIT_ID);
    let gate = SelectionGate::bind(doc.clone(), GateConfig::new(SubmitMatch::Button));
    assert_eq!(gate.checkbox_count(), 1);
    assert_eq!(gate.radio_count(), 1);

    doc.set_checked(radio, true);
    assert!(gate.evaluate(InputKind::Checkbox).disabled());
    assert!(doc.disabled(submit));

    let state = gate.sync();
    assert_eq!(state.source, GateSource::Sync);
    assert!(!state.disabled());
    assert!(!doc.disabled(submit));

    doc.set_checked(checkbox, true);
    assert!(!gate.evaluate(InputKind::Checkbox).disabled());
}

#[test]
fn disabled_inputs_do_not_trigger_the_gate() {
    let doc = Rc::new(MemoryDocument::new());
    let locked = doc.push(MemoryElement::input("checkbox").disabled(true));
    let submit = doc.push(
        MemoryElement::new("button")
            .with_id(DEFAULT_SUBMIT_ID)
            .disabled(true),
    );
    let _gate = SelectionGate::bind(doc.clone(), GateConfig::new(SubmitMatch::Button));

    assert!(!doc.click(locked));
    assert!(!doc.checked(locked));
    assert!(doc.disabled(submit));
}

#[test]
fn binds_to_parsed_answer_form() {
    let doc = Rc::new(
        MemoryDocument::parse(
            r#"
            <form class="form-group" action="" method="get">
                <input name="UserAnswer" type="checkbox" value="0" />&nbsp the dog <br/>
                <input name="UserAnswer" type="checkbox" value="1" />&nbsp the cat <br/>
                <button class="btn btn-primary" type="submit" id="SubmitAnswer" value="Submit!" disabled>Submit!</button>
            </form>
            "#,
        )
        .unwrap(),
    );
    let gate = SelectionGate::bind(doc.clone(), GateConfig::new(SubmitMatch::Button));
    assert_eq!(gate.checkbox_count(), 2);
    assert_eq!(gate.radio_count(), 0);

    let submit = doc.find_by_id(DEFAULT_SUBMIT_ID).unwrap();
    let boxes = doc.query_inputs(InputKind::Checkbox);
    assert!(doc.disabled(submit));

    doc.click(boxes[1]);
    assert!(!doc.disabled(submit));
    doc.click(boxes[1]);
    assert!(doc.disabled(submit));
}

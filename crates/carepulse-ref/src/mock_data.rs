//! Sample conversations for demos and smoke runs.
//!
//! All data in this module is hardcoded and fictional.

use carepulse_contracts::patient::ConversationRow;

const SAMPLE_CONVERSATIONS: &[&str] = &[
    "I have severe chest pain and cannot breathe.",
    "Just a mild headache.",
    "I feel very sad and hopeless.",
    "Scheduled checkup, feeling great.",
    "My son has had a fever and vomiting since last night, he is so tired.",
    "There is a lot of bleeding from the cut on my hand and I feel dizzy.",
    "Sudden shortness of breath, blue lips, I am really scared.",
    "Asthma is acting up again, some wheezing at night but otherwise okay.",
    "Follow-up on my blood pressure medication, no new complaints.",
    "I keep having thoughts about suicide and I don't know who to talk to.",
    "Twisted my ankle playing football, minor injury, swelling is going down.",
    "Migraine for three days, light hurts my eyes.",
];

/// The built-in sample batch, without patient ids.
pub fn sample_conversations() -> Vec<ConversationRow> {
    SAMPLE_CONVERSATIONS
        .iter()
        .map(|text| ConversationRow::from_text(*text))
        .collect()
}

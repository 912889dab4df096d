use std::fmt;

use thiserror::Error;

use crate::state::{JourneyArgs, JourneyPayload, JourneyState, RoomType};
use crate::steps::Step;

/// Errors raised while editing or submitting a form
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Field '{0}' is not part of this form")]
    UnknownField(&'static str),

    #[error("'{value}' is not an option for '{field}'")]
    InvalidOption { field: &'static str, value: String },
}

/// State fields the widget can edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    MemberName,
    HospitalName,
    HospitalCity,
    Abroad,
    AdmissionDate,
    Reason,
    Accident,
    RoomType,
}

impl FieldKey {
    /// Wire name of the field in the journey state
    pub fn name(&self) -> &'static str {
        match self {
            FieldKey::MemberName => "memberName",
            FieldKey::HospitalName => "hospitalName",
            FieldKey::HospitalCity => "hospitalCity",
            FieldKey::Abroad => "abroad",
            FieldKey::AdmissionDate => "admissionDate",
            FieldKey::Reason => "reason",
            FieldKey::Accident => "accident",
            FieldKey::RoomType => "roomType",
        }
    }

    /// Current value of the field as the control would display it
    pub fn read(&self, state: &JourneyState) -> Option<String> {
        match self {
            FieldKey::MemberName => state.member_name.clone(),
            FieldKey::HospitalName => state.hospital_name.clone(),
            FieldKey::HospitalCity => state.hospital_city.clone(),
            FieldKey::Abroad => state.abroad.map(|b| b.to_string()),
            FieldKey::AdmissionDate => state.admission_date.clone(),
            FieldKey::Reason => state.reason.clone(),
            FieldKey::Accident => state.accident.map(|b| b.to_string()),
            FieldKey::RoomType => state.room_type.map(|r| r.as_str().to_string()),
        }
    }

    fn write(&self, state: &mut JourneyState, value: &str) -> Result<(), FormError> {
        let invalid = || FormError::InvalidOption {
            field: self.name(),
            value: value.to_string(),
        };
        match self {
            FieldKey::MemberName => state.member_name = Some(value.to_string()),
            FieldKey::HospitalName => state.hospital_name = Some(value.to_string()),
            FieldKey::HospitalCity => state.hospital_city = Some(value.to_string()),
            FieldKey::Abroad => state.abroad = Some(value.parse().map_err(|_| invalid())?),
            FieldKey::AdmissionDate => state.admission_date = Some(value.to_string()),
            FieldKey::Reason => state.reason = Some(value.to_string()),
            FieldKey::Accident => state.accident = Some(value.parse().map_err(|_| invalid())?),
            FieldKey::RoomType => {
                state.room_type = Some(value.parse::<RoomType>().map_err(|_| invalid())?)
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

const ABROAD_OPTIONS: &[SelectOption] = &[
    SelectOption {
        value: "false",
        label: "No, Belgium",
    },
    SelectOption {
        value: "true",
        label: "Yes, outside Belgium",
    },
];

const ACCIDENT_OPTIONS: &[SelectOption] = &[
    SelectOption {
        value: "false",
        label: "No",
    },
    SelectOption {
        value: "true",
        label: "Yes",
    },
];

/// Shown by a select while nothing is chosen
pub const SELECT_PLACEHOLDER: &str = "Choose...";

const ROOM_OPTIONS: &[SelectOption] = &[
    SelectOption {
        value: "multi",
        label: "Multi-person room",
    },
    SelectOption {
        value: "single",
        label: "Single room",
    },
    SelectOption {
        value: "day",
        label: "Day admission",
    },
];

/// Input control of a form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Text { placeholder: &'static str },
    /// Nothing is selected while the state has no value
    Select { options: &'static [SelectOption] },
}

/// One editable field, pre-filled from the journey state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub key: FieldKey,
    pub label: &'static str,
    pub control: Control,
    value: String,
}

impl Field {
    fn new(key: FieldKey, label: &'static str, control: Control, state: &JourneyState) -> Self {
        Self {
            key,
            label,
            control,
            value: key.read(state).unwrap_or_default(),
        }
    }

    fn text(key: FieldKey, label: &'static str, placeholder: &'static str, state: &JourneyState) -> Self {
        Self::new(key, label, Control::Text { placeholder }, state)
    }

    fn select(
        key: FieldKey,
        label: &'static str,
        options: &'static [SelectOption],
        state: &JourneyState,
    ) -> Self {
        Self::new(key, label, Control::Select { options }, state)
    }

    /// Value currently shown in the control
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Label of the selected option, or the raw value for text fields.
    /// Empty while nothing is selected.
    pub fn display_value(&self) -> &str {
        match &self.control {
            Control::Text { .. } => &self.value,
            Control::Select { options } => options
                .iter()
                .find(|o| o.value == self.value)
                .map(|o| o.label)
                .unwrap_or(self.value.as_str()),
        }
    }

    fn set(&mut self, value: &str) -> Result<(), FormError> {
        if let Control::Select { options } = self.control {
            let option = options
                .iter()
                .find(|o| o.value == value || o.label.eq_ignore_ascii_case(value))
                .ok_or_else(|| FormError::InvalidOption {
                    field: self.key.name(),
                    value: value.to_string(),
                })?;
            self.value = option.value.to_string();
        } else {
            self.value = value.to_string();
        }
        Ok(())
    }
}

/// Primary action of a view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    pub id: &'static str,
    pub label: &'static str,
}

/// Editable view for a data-collection step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub step: Step,
    pub title: &'static str,
    pub fields: Vec<Field>,
    pub action: Action,
}

impl Form {
    pub fn field(&self, key: FieldKey) -> Option<&Field> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Edit a field as the user would
    pub fn set(&mut self, key: FieldKey, value: &str) -> Result<(), FormError> {
        self.fields
            .iter_mut()
            .find(|f| f.key == key)
            .ok_or(FormError::UnknownField(key.name()))?
            .set(value)
    }

    /// Read the form back and merge it into a copy of `state`.
    ///
    /// Form values override existing ones; fields not on this form pass
    /// through unchanged. A field the state never had is only written when
    /// the form shows a value for it, so an untouched form reproduces `state`
    /// exactly and what is displayed is what gets submitted.
    pub fn submit(&self, state: &JourneyState) -> Result<JourneyArgs, FormError> {
        let mut merged = state.clone();
        for field in &self.fields {
            if field.key.read(state).is_some() || !field.value.is_empty() {
                field.key.write(&mut merged, &field.value)?;
            }
        }
        Ok(JourneyArgs::new(self.step, merged))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub label: &'static str,
    pub value: String,
}

/// Read-only overview shown for `review` and `submitted`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub step: Step,
    pub title: &'static str,
    pub declaration_id: Option<String>,
    pub rows: Vec<SummaryRow>,
    pub note: &'static str,
    /// Present while the declaration can still be submitted
    pub action: Option<Action>,
}

impl Summary {
    /// Resend the state unchanged; `None` once the journey is complete
    pub fn submit(&self, state: &JourneyState) -> Option<JourneyArgs> {
        self.action
            .map(|_| JourneyArgs::new(self.step, state.clone()))
    }
}

/// The single view rendered for a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Form(Form),
    Summary(Summary),
}

impl View {
    pub fn step(&self) -> Step {
        match self {
            View::Form(form) => form.step,
            View::Summary(summary) => summary.step,
        }
    }
}

/// Render the view for the latest tool payload
pub fn render(payload: &JourneyPayload) -> View {
    let state = &payload.state;
    let step = payload.step;

    let form = |title, fields, action| {
        View::Form(Form {
            step,
            title,
            fields,
            action,
        })
    };

    match step {
        Step::Start => form(
            "Hospital Admission",
            Vec::new(),
            Action {
                id: "start",
                label: "Start",
            },
        ),
        Step::SelectMember => form(
            "Step 1: Who is being admitted?",
            vec![Field::text(
                FieldKey::MemberName,
                "Patient Name",
                "E.g., yourself or child",
                state,
            )],
            Action {
                id: "memberNext",
                label: "Next",
            },
        ),
        Step::SelectHospital => form(
            "Step 2: Hospital Selection",
            vec![
                Field::text(FieldKey::HospitalName, "Hospital Name", "E.g., UZ Leuven", state),
                Field::text(
                    FieldKey::HospitalCity,
                    "City / Municipality",
                    "City or municipality",
                    state,
                ),
                Field::select(FieldKey::Abroad, "Abroad?", ABROAD_OPTIONS, state),
            ],
            Action {
                id: "hospitalNext",
                label: "Next",
            },
        ),
        Step::AdmissionDetails => form(
            "Step 3: Admission Details",
            vec![
                Field::text(
                    FieldKey::AdmissionDate,
                    "Admission Date",
                    "E.g., 24/03/2026",
                    state,
                ),
                Field::text(
                    FieldKey::Reason,
                    "Reason for Admission",
                    "E.g., knee surgery, childbirth",
                    state,
                ),
                Field::select(
                    FieldKey::Accident,
                    "Is this the result of an accident?",
                    ACCIDENT_OPTIONS,
                    state,
                ),
            ],
            Action {
                id: "detailsNext",
                label: "Next",
            },
        ),
        Step::RoomType => form(
            "Step 4: Room Type",
            vec![Field::select(
                FieldKey::RoomType,
                "Room Type",
                ROOM_OPTIONS,
                state,
            )],
            Action {
                id: "roomNext",
                label: "Review",
            },
        ),
        Step::Review | Step::Submitted => View::Summary(summary(step, state)),
    }
}

fn summary(step: Step, state: &JourneyState) -> Summary {
    let or_dash = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());

    let hospital = match &state.hospital_city {
        Some(city) if !city.is_empty() => format!("{} ({})", or_dash(&state.hospital_name), city),
        _ => or_dash(&state.hospital_name),
    };

    let rows = vec![
        SummaryRow {
            label: "Patient",
            value: or_dash(&state.member_name),
        },
        SummaryRow {
            label: "Hospital",
            value: hospital,
        },
        SummaryRow {
            label: "Admission Date",
            value: or_dash(&state.admission_date),
        },
        SummaryRow {
            label: "Reason",
            value: or_dash(&state.reason),
        },
        SummaryRow {
            label: "Accident",
            value: if state.accident == Some(true) {
                "Yes".into()
            } else {
                "No or unknown".into()
            },
        },
        SummaryRow {
            label: "Room Type",
            value: state
                .room_type
                .map(|r| r.label().to_string())
                .unwrap_or_else(|| "-".to_string()),
        },
    ];

    Summary {
        step,
        title: "Overview: Hospitalization (Demo)",
        declaration_id: state.declaration_id.clone(),
        rows,
        note: "In production, this would also show your member number and information about third-party payment arrangements.",
        action: (step == Step::Review).then_some(Action {
            id: "submit",
            label: "Submit",
        }),
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Form(form) => {
                writeln!(f, "== {} ==", form.title)?;
                for field in &form.fields {
                    match &field.control {
                        Control::Text { placeholder } if field.value.is_empty() => {
                            writeln!(f, "  {}: ({})", field.label, placeholder)?
                        }
                        Control::Text { .. } => writeln!(f, "  {}: {}", field.label, field.value)?,
                        Control::Select { options } => {
                            let placeholder = field.value.is_empty().then(|| {
                                format!("[{}]", SELECT_PLACEHOLDER)
                            });
                            let choices: Vec<String> = placeholder
                                .into_iter()
                                .chain(options.iter().map(|o| {
                                    if o.value == field.value {
                                        format!("[{}]", o.label)
                                    } else {
                                        o.label.to_string()
                                    }
                                }))
                                .collect();
                            writeln!(f, "  {}: {}", field.label, choices.join(" / "))?
                        }
                    }
                }
                write!(f, "[{}]", form.action.label)
            }
            View::Summary(summary) => {
                writeln!(f, "== {} ==", summary.title)?;
                if let Some(id) = &summary.declaration_id {
                    writeln!(f, "  Declaration ID: {}", id)?;
                }
                for row in &summary.rows {
                    writeln!(f, "  {}: {}", row.label, row.value)?;
                }
                write!(f, "  {}", summary.note)?;
                if let Some(action) = &summary.action {
                    write!(f, "\n[{}]", action.label)?;
                }
                Ok(())
            }
        }
    }
}

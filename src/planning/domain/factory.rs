//! The checklist rules.

use super::{ChecklistRules, PlanningContext};
use crate::reference::domain::{Country, CountryUnion};
use crate::task::domain::TaskDraft;
use chrono::{Days, NaiveDate, TimeDelta};
use tracing::debug;

const PASSPORT_TITLE: &str = "Check Passport Validity Date";
const PASSPORT_COMMENT: &str = "Most of the time, your passport has to be valid at least for the \
                                three months following your departure.";

const UNKNOWN_COUNTRY_VISA_TITLE: &str = "Visa may be needed.";
const UNKNOWN_COUNTRY_VISA_COMMENT: &str =
    "We don't have your country in our base, retry with its name in English please.";
const NO_VISA_TITLE: &str = "No Visa Needed";
const VISA_COMMENT: &str = "Contact the Embassy of your destination country.";

const VACCINE_LIST_TITLE: &str = "Check your vaccines (+)";
const VACCINE_COMMENT: &str = "Both required and advised vaccines !";

const MALARIA_TITLE: &str = "Protection for mosquito bites";
const MALARIA_COMMENT: &str =
    "insect repellent, insecticide-treated bednet, pre-treating clothing, ...";

const METEO_TITLE: &str = "Check meteo";

const FLIGHT_TITLE: &str = "Flight Must Have !";
const LONG_FLIGHT_COMMENT: &str = "Take your earplugs and your sleep mask for your flight";
const SHORT_FLIGHT_COMMENT: &str = "Take some food and some drinks for your flight";

const BANKING_TITLE: &str = "Check your banking fees";
const BANKING_COMMENT: &str = "You should contact your bank account manager to ask the amount of \
                               banking fees you will have to pay when you will pay with your card \
                               or when you will use a cash machine.";

const REPATRIATION_TITLE: &str = "Check repatriation insurance";
const REPATRIATION_RECOMMENDED: &str = "It seems to be recommended for this country !";
const REPATRIATION_OPTIONAL: &str =
    "Not really required but if you need this to relax yourself, go on :-)";
const UNKNOWN_INSURANCE_TITLE: &str = "Check required insurance";
const UNKNOWN_INSURANCE_COMMENT: &str = "We got no information for your country, sorry !";

const SYSTEMATIC: [(&str, &str); 3] = [
    (
        "Check cabin baggage dimensions",
        "Ask your company website which size your cabin baggage can be.",
    ),
    (
        "Labels on your baggage",
        "It really helps if your baggage is lost during the flight !",
    ),
    (
        "Make copies of your papers.",
        "Put one copy of your passport, your visa and your flight ticket in each luggage. Copy \
         them on your smartphone and have them on the internet.",
    ),
];

const LONG_TRAVEL_TITLE: &str = "Long travel To-Do";

/// Builds the generated checklist of a trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFactory {
    rules: ChecklistRules,
}

impl TaskFactory {
    /// Creates a factory applying the given thresholds.
    #[must_use]
    pub const fn new(rules: ChecklistRules) -> Self {
        Self { rules }
    }

    /// Returns the thresholds in use.
    #[must_use]
    pub const fn rules(&self) -> ChecklistRules {
        self.rules
    }

    /// Runs every rule in order and returns the resulting drafts.
    ///
    /// Rules that need the arrival country record are skipped when it is
    /// unknown.
    #[must_use]
    pub fn drafts(&self, context: &PlanningContext) -> Vec<TaskDraft> {
        let mut drafts = Vec::new();

        passport(&mut drafts);
        visa(context, &mut drafts);
        if let Some(arrival) = context.arrival_country() {
            self.vaccines(context, arrival, &mut drafts);
            malaria(arrival, &mut drafts);
        }
        weather(context, &mut drafts);
        self.flight_needs(context, &mut drafts);
        banking(&mut drafts);
        if let Some(arrival) = context.arrival_country() {
            insurance(arrival, &mut drafts);
        }
        systematic(&mut drafts);
        self.long_travel(context, &mut drafts);

        debug!(
            trip_id = %context.trip().id(),
            count = drafts.len(),
            "checklist drafted"
        );
        drafts
    }

    fn vaccines(&self, context: &PlanningContext, arrival: &Country, drafts: &mut Vec<TaskDraft>) {
        let trip = context.trip();
        let deadline = trip
            .departure_date()
            .checked_sub_days(Days::new(u64::from(self.rules.vaccine_lead_days)));

        if !arrival.vaccines().is_empty() {
            let categories: Vec<&str> = arrival
                .vaccines()
                .iter()
                .map(|vaccine| vaccine.category())
                .collect();
            drafts.push(with_optional_deadline(
                TaskDraft::new(VACCINE_LIST_TITLE).with_comments(categories.join("\n")),
                deadline,
            ));
        }
        drafts.push(with_optional_deadline(
            TaskDraft::new(format!("Check vaccines for {}", trip.arrival().country()))
                .with_comments(VACCINE_COMMENT),
            deadline,
        ));
        debug!(rule = "vaccines", listed = arrival.vaccines().len(), "rule applied");
    }

    fn flight_needs(&self, context: &PlanningContext, drafts: &mut Vec<TaskDraft>) {
        let threshold = TimeDelta::hours(i64::from(self.rules.long_flight_hours));
        let long_flight = context.trip().flight_duration() > threshold;
        let comment = if long_flight {
            LONG_FLIGHT_COMMENT
        } else {
            SHORT_FLIGHT_COMMENT
        };
        drafts.push(TaskDraft::new(FLIGHT_TITLE).with_comments(comment));
        debug!(rule = "flight_needs", long_flight, "rule applied");
    }

    fn long_travel(&self, context: &PlanningContext, drafts: &mut Vec<TaskDraft>) {
        let threshold = TimeDelta::days(i64::from(self.rules.long_stay_days));
        let long_stay = context
            .trip()
            .stay_duration()
            .is_none_or(|stay| stay > threshold);
        if long_stay {
            drafts.push(TaskDraft::new(LONG_TRAVEL_TITLE));
        }
        debug!(rule = "long_travel", long_stay, "rule applied");
    }
}

fn with_optional_deadline(draft: TaskDraft, deadline: Option<NaiveDate>) -> TaskDraft {
    TaskDraft { deadline, ..draft }
}

fn passport(drafts: &mut Vec<TaskDraft>) {
    drafts.push(TaskDraft::new(PASSPORT_TITLE).with_comments(PASSPORT_COMMENT));
}

fn visa(context: &PlanningContext, drafts: &mut Vec<TaskDraft>) {
    let (Some(departure), Some(arrival)) = (context.departure_country(), context.arrival_country())
    else {
        drafts.push(
            TaskDraft::new(UNKNOWN_COUNTRY_VISA_TITLE).with_comments(UNKNOWN_COUNTRY_VISA_COMMENT),
        );
        debug!(rule = "visa", outcome = "unknown_country", "rule applied");
        return;
    };

    if visa_free(departure, arrival, context.departure_unions()) {
        drafts.push(TaskDraft::new(NO_VISA_TITLE));
        debug!(rule = "visa", outcome = "visa_free", "rule applied");
        return;
    }

    for union in context
        .arrival_unions()
        .iter()
        .filter(|union| union.common_visa())
    {
        drafts.push(TaskDraft::new(format!("{} Visa or", union.name())));
    }
    drafts.push(
        TaskDraft::new(format!("{}'s Visa Needed", arrival.name())).with_comments(VISA_COMMENT),
    );
    debug!(rule = "visa", outcome = "visa_needed", "rule applied");
}

fn visa_free(departure: &Country, arrival: &Country, departure_unions: &[CountryUnion]) -> bool {
    departure.name() == arrival.name()
        || departure_unions.iter().any(|union| {
            !union.visa_required_between_members() && union.covers(departure.name(), arrival.name())
        })
}

fn malaria(arrival: &Country, drafts: &mut Vec<TaskDraft>) {
    if arrival.malaria_presence() {
        drafts.push(TaskDraft::new(MALARIA_TITLE).with_comments(MALARIA_COMMENT));
    }
    debug!(rule = "malaria", present = arrival.malaria_presence(), "rule applied");
}

fn weather(context: &PlanningContext, drafts: &mut Vec<TaskDraft>) {
    if let Some(climate) = context.arrival_climate() {
        drafts.push(
            TaskDraft::new(format!("Check climate in {} (+)", climate.country()))
                .with_comments(climate.description()),
        );
        debug!(rule = "weather", climate_known = true, "rule applied");
        return;
    }
    drafts.push(TaskDraft::new(METEO_TITLE).with_comments(format!(
        "Check weather conditions in {} and prepare appropriate clothing",
        context.trip().arrival().country()
    )));
    debug!(rule = "weather", climate_known = false, "rule applied");
}

fn banking(drafts: &mut Vec<TaskDraft>) {
    drafts.push(TaskDraft::new(BANKING_TITLE).with_comments(BANKING_COMMENT));
}

fn insurance(arrival: &Country, drafts: &mut Vec<TaskDraft>) {
    let draft = match arrival.advisory_level() {
        Some(level) if level.is_elevated() => {
            TaskDraft::new(REPATRIATION_TITLE).with_comments(REPATRIATION_RECOMMENDED)
        }
        Some(_) => TaskDraft::new(REPATRIATION_TITLE).with_comments(REPATRIATION_OPTIONAL),
        None => TaskDraft::new(UNKNOWN_INSURANCE_TITLE).with_comments(UNKNOWN_INSURANCE_COMMENT),
    };
    drafts.push(draft);
}

fn systematic(drafts: &mut Vec<TaskDraft>) {
    drafts.extend(
        SYSTEMATIC
            .iter()
            .map(|(title, comment)| TaskDraft::new(*title).with_comments(*comment)),
    );
}

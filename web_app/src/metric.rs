use opentelemetry::{KeyValue, metrics::UpDownCounter};
use std::sync::LazyLock;

static STATDS: LazyLock<UpDownCounter<i64>> = LazyLock::new(|| {
    logfire::i64_up_down_counter("pet_care_statds")
        .with_description("Pet care app statistics")
        .with_unit("attempt")
        .build()
});

fn incr_statds(metric: &'static str, value: &str) {
    STATDS.add(1, &[KeyValue::new(metric, value.to_string())]);
}

pub fn incr_user_action_statds(action: &str) {
    incr_statds("user_action", action)
}

pub fn incr_pet_action_statds(action: &str) {
    incr_statds("pet_action", action)
}

pub fn incr_event_action_statds(action: &str) {
    incr_statds("event_action", action)
}

pub fn incr_goal_action_statds(action: &str) {
    incr_statds("goal_action", action)
}

pub fn incr_shopping_action_statds(action: &str) {
    incr_statds("shopping_action", action)
}

pub fn incr_checkout_statds(status: &str) {
    incr_statds("checkout_status", status)
}

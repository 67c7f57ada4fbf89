pub const METRIC_GROUP_LAG: &str = "kafka_consumergroup_group_lag";
pub const METRIC_GROUP_HEALTH: &str = "kafka_consumergroup_group_health";
pub const METRIC_TOTAL_LAG: &str = "api_group_lag";

pub const METRIC_UP: &str = "grouplag_exporter_up";
pub const METRIC_POLL_DURATION_SECONDS: &str = "grouplag_exporter_poll_duration_seconds";
pub const METRIC_LAST_POLL_TIMESTAMP: &str = "grouplag_exporter_last_poll_timestamp_seconds";

pub const LABEL_GROUP: &str = "group";

pub const HELP_GROUP_LAG: &str = "Consumer lag reported upstream for a consumer group";
pub const HELP_GROUP_HEALTH: &str =
    "Numeric consumer group state (0=UNKNOWN 1=PREPARING_REBALANCE 2=COMPLETING_REBALANCE 3=STABLE 4=DEAD 5=EMPTY)";
pub const HELP_TOTAL_LAG: &str = "Aggregate group lag value from the upstream endpoint";
pub const HELP_UP: &str = "1 if the exporter is healthy, 0 otherwise";
pub const HELP_POLL_DURATION_SECONDS: &str = "Duration of the last successful poll in seconds";
pub const HELP_LAST_POLL_TIMESTAMP: &str = "Unix timestamp of the last successful poll";

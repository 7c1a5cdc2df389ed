//! SQL for every warehouse query.
//!
//! User ids and timestamps are typed integers formatted into the text, so no
//! value supplied at runtime is ever spliced in as a string.

use super::dialect::Dialect;
use crate::domain::Roster;
use crate::port::outbound::warehouse::QueryName;

/// Tables read by the reports, in the order `check warehouse` probes them.
pub const KNOWN_TABLES: &[&str] = &[
    "player_token_transaction",
    "player_token_account",
    "full_WC_result",
    "full_WC_horse_snapshot",
    "full_WC_entrant",
    "full_WC_event",
    "player_horse",
    "player_daily_fact_distance",
    "player_daily_fact_grade",
    "player_daily_fact_track",
];

/// Values shared by every query of one fetch.
#[derive(Debug, Clone)]
pub struct QueryContext {
    pub dialect: Dialect,
    ids: String,
    /// Unix seconds at UTC midnight of the reporting start date.
    pub cutoff: i64,
    /// Unix seconds; stakes older than this are not counted as in play.
    pub in_play_since: Option<i64>,
}

impl QueryContext {
    #[must_use]
    pub fn new(dialect: Dialect, roster: &Roster, cutoff: i64) -> Self {
        Self {
            dialect,
            ids: roster.sql_id_list(),
            cutoff,
            in_play_since: None,
        }
    }

    #[must_use]
    pub fn with_in_play_since(mut self, since: Option<i64>) -> Self {
        self.in_play_since = since;
        self
    }

    /// SQL text for `query`.
    ///
    /// `WeeklyPnl` shares the daily query; the weekly figures are rolled up
    /// from the daily rows.
    #[must_use]
    pub fn sql(&self, query: QueryName) -> String {
        match query {
            QueryName::TotalPnl => self.total_pnl(),
            QueryName::InPlayBalance => self.in_play_balance(),
            QueryName::ReserveBalance => self.reserve_balance(),
            QueryName::RacesEntered => self.races_entered(),
            QueryName::DailyPnl | QueryName::WeeklyPnl => self.daily_pnl(),
            QueryName::HorsePerformance => self.horse_performance(),
            QueryName::StableComposition => self.stable_composition(),
            QueryName::HorseInventory => self.horse_inventory(),
            QueryName::DistancePerformance => self.distance_performance(),
            QueryName::SurfacePerformance => self.surface_performance(),
            QueryName::DistanceMix => self.mix("player_daily_fact_distance", "distance", "", "distance"),
            QueryName::GradeMix => self.mix("player_daily_fact_grade", "grade", "AND grade > 0", "grade"),
            QueryName::TrackMix => {
                self.mix("player_daily_fact_track", "track_id", "", "total_races DESC")
            }
        }
    }

    fn int(&self, expr: &str) -> String {
        self.dialect.integer(expr)
    }

    fn real(&self, expr: &str) -> String {
        self.dialect.real(expr)
    }

    fn text(&self, expr: &str) -> String {
        self.dialect.text(expr)
    }

    fn total_pnl(&self) -> String {
        format!(
            "SELECT {user}, {sum} AS micros \
             FROM player_token_transaction \
             WHERE user_id IN ({ids}) AND created_at >= {cutoff} \
             GROUP BY user_id ORDER BY user_id",
            user = self.user_column("user_id"),
            sum = self.int("SUM(amount)"),
            ids = self.ids,
            cutoff = self.cutoff,
        )
    }

    fn in_play_balance(&self) -> String {
        let window = self
            .in_play_since
            .map(|since| format!(" AND t.created_at >= {since}"))
            .unwrap_or_default();
        format!(
            "SELECT {user}, {sum} AS micros \
             FROM player_token_transaction t \
             LEFT JOIN full_WC_result r ON t.source_trx_id = r.event_id \
             WHERE t.user_id IN ({ids}) AND t.amount < 0 AND t.ctx_type = 1 \
             AND r.event_id IS NULL{window} \
             GROUP BY t.user_id ORDER BY t.user_id",
            user = self.user_column("t.user_id"),
            sum = self.int("SUM(ABS(t.amount))"),
            ids = self.ids,
        )
    }

    fn reserve_balance(&self) -> String {
        format!(
            "SELECT {user}, {sum} AS micros \
             FROM player_token_account \
             WHERE user_id IN ({ids}) \
             GROUP BY user_id ORDER BY user_id",
            user = self.user_column("user_id"),
            sum = self.int("SUM(amount)"),
            ids = self.ids,
        )
    }

    fn races_entered(&self) -> String {
        format!(
            "SELECT {user}, {count} AS races_entered \
             FROM full_WC_horse_snapshot \
             WHERE user_id IN ({ids}) \
             GROUP BY user_id ORDER BY user_id",
            user = self.user_column("user_id"),
            count = self.int("COUNT(*)"),
            ids = self.ids,
        )
    }

    fn daily_pnl(&self) -> String {
        let day = self.dialect.utc_day("created_at");
        format!(
            "SELECT {user}, {day} AS day, {sum} AS micros \
             FROM player_token_transaction \
             WHERE ctx_type = 1 AND user_id IN ({ids}) AND created_at >= {cutoff} \
             GROUP BY user_id, {day} ORDER BY user_id, day",
            user = self.user_column("user_id"),
            sum = self.int("SUM(amount)"),
            ids = self.ids,
            cutoff = self.cutoff,
        )
    }

    fn horse_performance(&self) -> String {
        format!(
            "SELECT {user}, {horse} AS user_horse_id, {name} AS horse_name, \
             {generation} AS generation, {grade} AS grade, {gender} AS gender, \
             {age} AS age, {trainer} AS trainer_id, \
             {races} AS total_races, \
             {avg_pos} AS avg_finish_position, \
             {wins} AS wins, {top3} AS top_3_finishes, \
             {rating} AS avg_rating, {speed} AS avg_speed, \
             {stamina} AS avg_stamina, {accel} AS avg_acceleration, \
             {earnings} AS career_micros \
             FROM full_WC_horse_snapshot hs \
             WHERE hs.user_id IN ({ids}) AND hs.user_horse_id > 0 \
             GROUP BY hs.user_id, hs.user_horse_id, hs.name, hs.generation, hs.grade, \
             hs.gender, hs.age, hs.trainer_id \
             ORDER BY hs.user_id, total_races DESC",
            user = self.user_column("hs.user_id"),
            horse = self.int("hs.user_horse_id"),
            name = self.text("hs.name"),
            generation = self.int("hs.generation"),
            grade = self.int("hs.grade"),
            gender = self.int("hs.gender"),
            age = self.int("hs.age"),
            trainer = self.int("hs.trainer_id"),
            races = self.int("COUNT(DISTINCT hs._id)"),
            avg_pos = self.real("AVG(hs.final_position)"),
            wins = self.int("SUM(CASE WHEN hs.final_position = 1 THEN 1 ELSE 0 END)"),
            top3 = self.int("SUM(CASE WHEN hs.final_position <= 3 THEN 1 ELSE 0 END)"),
            rating = self.real("AVG(hs.rating)"),
            speed = self.real("AVG(hs.speed)"),
            stamina = self.real("AVG(hs.stamina)"),
            accel = self.real("AVG(hs.acceleration)"),
            earnings = self.int("SUM(hs.career_earnings)"),
            ids = self.ids,
        )
    }

    fn stable_composition(&self) -> String {
        let count_where = |cond: &str| self.int(&format!("SUM(CASE WHEN {cond} THEN 1 ELSE 0 END)"));
        format!(
            "SELECT {user}, {total} AS total_horses, \
             {g1} AS grade_1_horses, {g2} AS grade_2_horses, {g3} AS grade_3_horses, \
             {b1} AS bloodline_1_horses, {b2} AS bloodline_2_horses, \
             {active} AS active_horses, {avg_gen} AS avg_generation \
             FROM player_horse \
             WHERE user_id IN ({ids}) AND oc_shard > 0 \
             GROUP BY user_id ORDER BY user_id",
            user = self.user_column("user_id"),
            total = self.int("COUNT(*)"),
            g1 = count_where("grade = 1"),
            g2 = count_where("grade = 2"),
            g3 = count_where("grade = 3"),
            b1 = count_where("bloodline = 1"),
            b2 = count_where("bloodline = 2"),
            active = count_where("status = 0"),
            avg_gen = self.real("AVG(gen)"),
            ids = self.ids,
        )
    }

    fn horse_inventory(&self) -> String {
        format!(
            "SELECT {user}, {id} AS horse_id, {name} AS horse_name, {grade} AS grade, \
             {bloodline} AS bloodline, {generation} AS generation, {gender} AS gender, \
             {age} AS age, {trainer} AS trainer_id, {status} AS status, \
             {kind} AS horse_type_id, {modified} AS last_updated \
             FROM player_horse \
             WHERE user_id IN ({ids}) AND oc_shard > 0 \
             ORDER BY user_id, grade DESC, horse_name",
            user = self.user_column("user_id"),
            id = self.int("_id"),
            name = self.text("name"),
            grade = self.int("grade"),
            bloodline = self.int("bloodline"),
            generation = self.int("gen"),
            gender = self.int("gender"),
            age = self.int("age"),
            trainer = self.int("trainer_id"),
            status = self.int("status"),
            kind = self.int("horse_type_id"),
            modified = self.text("modified_utc"),
            ids = self.ids,
        )
    }

    /// Shared select list of the per-horse finishing statistics.
    fn finishing_stats(&self) -> String {
        format!(
            "{races} AS races, {avg} AS avg_position, {best} AS best_position, \
             {worst} AS worst_position, {wins} AS wins, {top3} AS top_3_finishes, \
             {rating} AS avg_rating",
            races = self.int("COUNT(DISTINCT ent.event_id)"),
            avg = self.real("AVG(hs.final_position)"),
            best = self.int("MIN(hs.final_position)"),
            worst = self.int("MAX(hs.final_position)"),
            wins = self.int("SUM(CASE WHEN hs.final_position = 1 THEN 1 ELSE 0 END)"),
            top3 = self.int("SUM(CASE WHEN hs.final_position <= 3 THEN 1 ELSE 0 END)"),
            rating = self.real("AVG(hs.rating)"),
        )
    }

    const ENTRANT_JOIN: &'static str = "FROM full_WC_horse_snapshot hs \
         INNER JOIN full_WC_entrant ent ON hs._id = ent.horse_snapshot_id AND hs.Zone = ent.Zone \
         INNER JOIN full_WC_event e ON ent.event_id = e._id AND ent.Zone = e.Zone";

    fn distance_performance(&self) -> String {
        format!(
            "SELECT {user}, {horse} AS user_horse_id, {name} AS horse_name, \
             {distance} AS distance, {stats} \
             {join} \
             WHERE hs.user_id IN ({ids}) AND e.distance IS NOT NULL \
             GROUP BY hs.user_id, hs.user_horse_id, hs.name, e.distance \
             ORDER BY hs.user_id, hs.user_horse_id, e.distance",
            user = self.user_column("hs.user_id"),
            horse = self.int("hs.user_horse_id"),
            name = self.text("hs.name"),
            distance = self.int("e.distance"),
            stats = self.finishing_stats(),
            join = Self::ENTRANT_JOIN,
            ids = self.ids,
        )
    }

    fn surface_performance(&self) -> String {
        format!(
            "SELECT {user}, {horse} AS user_horse_id, {name} AS horse_name, \
             {surface} AS surface, {weather} AS weather, {condition} AS track_condition, {stats} \
             {join} \
             WHERE hs.user_id IN ({ids}) AND e.surface IS NOT NULL \
             GROUP BY hs.user_id, hs.user_horse_id, hs.name, e.surface, e.weather, e.`condition` \
             ORDER BY hs.user_id, hs.user_horse_id, races DESC",
            user = self.user_column("hs.user_id"),
            horse = self.int("hs.user_horse_id"),
            name = self.text("hs.name"),
            surface = self.int("e.surface"),
            weather = self.int("e.weather"),
            condition = self.int("e.`condition`"),
            stats = self.finishing_stats(),
            join = Self::ENTRANT_JOIN,
            ids = self.ids,
        )
    }

    fn mix(&self, table: &str, bucket: &str, filter: &str, order: &str) -> String {
        format!(
            "SELECT {user}, {bucket_col} AS bucket, {sum} AS total_races \
             FROM {table} \
             WHERE user_id IN ({ids}) {filter} \
             GROUP BY user_id, {bucket} ORDER BY user_id, {order}",
            user = self.user_column("user_id"),
            bucket_col = self.int(bucket),
            sum = self.int("SUM(`count`)"),
            ids = self.ids,
        )
    }

    fn user_column(&self, column: &str) -> String {
        format!("{} AS user_id", self.int(column))
    }
}

/// All races of one horse, newest event first.
#[must_use]
pub fn race_history_sql(dialect: Dialect, user_horse_id: i64) -> String {
    let int = |expr: &str| dialect.integer(expr);
    format!(
        "SELECT {user} AS user_id, {horse} AS user_horse_id, {event} AS event_id, \
         {position} AS final_position, {stall} AS stall, {distance} AS distance, \
         {surface} AS surface, {weather} AS weather, {condition} AS track_condition, \
         {track} AS track_name, {zone} AS zone \
         FROM full_WC_entrant ent \
         INNER JOIN full_WC_event e ON ent.event_id = e._id AND ent.Zone = e.Zone \
         WHERE ent.user_horse_id = {user_horse_id} \
         ORDER BY ent.event_id DESC",
        user = int("ent.user_id"),
        horse = int("ent.user_horse_id"),
        event = int("ent.event_id"),
        position = int("ent.final_position"),
        stall = int("ent.stall"),
        distance = int("e.distance"),
        surface = int("e.surface"),
        weather = int("e.weather"),
        condition = int("e.`condition`"),
        track = dialect.text("e.track_name"),
        zone = dialect.text("ent.Zone"),
    )
}

/// Row count of one known table.
#[must_use]
pub fn row_count_sql(dialect: Dialect, table: &str) -> String {
    format!("SELECT {} AS row_count FROM {table}", dialect.integer("COUNT(*)"))
}

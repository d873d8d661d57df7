pub fn settlements_key(group_id: &str, run: u64) -> String {
    format!("settlements:{}:{}", group_id, run)
}

pub fn group_prefix(group_id: &str) -> String {
    format!("settlements:{}:", group_id)
}

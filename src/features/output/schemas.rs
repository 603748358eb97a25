use serde_json::{Value, json};

fn count() -> Value {
    json!({"type": ["integer", "null"], "minimum": 0})
}

fn optional_text() -> Value {
    json!({"type": ["string", "null"]})
}

pub fn parties_schema() -> Value {
    json!({
        "type": "array",
        "items": {
            "type": "object",
            "required": ["name", "symbol", "total_seats"],
            "properties": {
                "name": {"type": "string", "minLength": 1},
                "symbol": optional_text(),
                "total_seats": {"type": "integer", "minimum": 0}
            },
            "additionalProperties": false
        }
    })
}

pub fn constituencies_schema() -> Value {
    json!({
        "type": "array",
        "items": {
            "type": "object",
            "required": ["code", "name"],
            "properties": {
                "code": {"type": "string", "minLength": 1},
                "name": {"type": "string", "minLength": 1},
                "state_code": {"type": "string", "minLength": 2}
            },
            "additionalProperties": false
        }
    })
}

pub fn candidates_schema() -> Value {
    json!({
        "type": "array",
        "items": {
            "type": "object",
            "required": ["name", "party", "constituency_code", "votes", "margin", "status", "photo_url"],
            "properties": {
                "name": {
                    "type": "string",
                    "minLength": 1,
                    "not": {"enum": ["NOTA", "Nota", "nota"]}
                },
                "party": {"type": "string", "minLength": 1},
                "constituency_code": {"type": "string", "minLength": 1},
                "state_code": {"type": "string", "minLength": 2},
                "votes": count(),
                "margin": count(),
                "status": {"type": "string", "enum": ["WON", "LOST", "UNKNOWN"]},
                "photo_url": optional_text()
            },
            "additionalProperties": false
        }
    })
}

pub fn election_schema() -> Value {
    json!({
        "type": "object",
        "required": [
            "id", "name", "type", "year", "total_constituencies", "total_candidates",
            "total_parties", "result_status", "incomplete", "gaps", "source_url", "scraped_at"
        ],
        "properties": {
            "id": {"type": "string", "minLength": 1},
            "name": {"type": "string", "minLength": 1},
            "type": {"type": "string", "enum": ["LOK_SABHA", "VIDHAN_SABHA"]},
            "year": {"type": "integer", "minimum": 1950, "maximum": 2099},
            "state_code": optional_text(),
            "state_name": optional_text(),
            "total_constituencies": {"type": "integer", "minimum": 0},
            "total_candidates": {"type": "integer", "minimum": 0},
            "total_parties": {"type": "integer", "minimum": 0},
            "result_status": {"type": "string", "enum": ["COMPLETE", "INCOMPLETE"]},
            "incomplete": {"type": "boolean"},
            "gaps": {"type": "integer", "minimum": 0},
            "winning_party": optional_text(),
            "winning_party_seats": count(),
            "runner_up_party": optional_text(),
            "runner_up_seats": count(),
            "source_url": {"type": "string", "minLength": 1},
            "scraped_at": {"type": "string", "minLength": 1}
        },
        "additionalProperties": false
    })
}

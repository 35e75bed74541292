use super::AutoIncrementPlan;

/// `<table>_<primary>_seq`
#[must_use]
pub fn sequence_name(plan: &AutoIncrementPlan) -> String {
    format!("{}_{}_seq", plan.table, plan.primary)
}

/// PL/SQL block dropping the sequence if present.
#[must_use]
pub fn drop_sequence_statement(plan: &AutoIncrementPlan) -> String {
    let seq = sequence_name(plan);
    [
        "begin".to_string(),
        format!("  execute immediate 'drop sequence \"{seq}\"';"),
        "exception".to_string(),
        "  when others then".to_string(),
        "    if sqlcode != -0942 then".to_string(),
        "      dbms_output.put_line(sqlcode||'---'||sqlerrm);".to_string(),
        "    end if;".to_string(),
        "end;".to_string(),
    ]
    .join("\n")
}

#[must_use]
pub fn create_sequence_statement(plan: &AutoIncrementPlan) -> String {
    format!(
        "create sequence \"{}\" increment by {} start with {}",
        sequence_name(plan),
        plan.step,
        plan.start
    )
}

/// Row-level trigger filling the primary key from the sequence.
#[must_use]
pub fn create_trigger_statement(plan: &AutoIncrementPlan) -> String {
    let table = &plan.table;
    [
        format!(
            "create or replace trigger \"{table}_trigger\" before insert on \"{table}\" for each row"
        ),
        "begin".to_string(),
        format!(
            "  select \"{}\".nextval into :new.\"{}\" from dual;",
            sequence_name(plan),
            plan.primary
        ),
        "end;".to_string(),
    ]
    .join("\n")
}

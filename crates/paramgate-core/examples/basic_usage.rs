//! Basic usage example for paramgate-core
//!
//! Run with: cargo run --example basic_usage

use paramgate_core::{
    ChoiceParameter, Condition, ConditionSet, Operator, ParameterGate, RequestValues,
    UnknownOperatorPolicy,
};

fn main() {
    println!("=== PARAMGATE Core Basic Usage Example ===\n");

    // Example 1: A single condition (env equals "prod")
    println!("1. Single Condition:");
    let condition = Condition::new("env", Operator::Equals, "prod");
    let values = RequestValues::new().with("env", "prod");
    println!(
        "   {} against env=prod => {:?}\n",
        condition,
        paramgate_core::evaluate_condition(&condition, &values)
    );

    // Example 2: A condition set (branch startsWith "release-" AND env equals "prod")
    println!("2. Condition Set:");
    let set = ConditionSet::all(vec![
        Condition::new("branch", Operator::StartsWith, "release-"),
        Condition::new("env", Operator::Equals, "prod"),
    ]);
    for env in ["prod", "dev"] {
        let values = RequestValues::new()
            .with("branch", "release-2.3")
            .with("env", env);
        println!(
            "   branch=release-2.3 env={} => {:?}",
            env,
            paramgate_core::evaluate(&set, &values)
        );
    }
    println!();

    // Example 3: A gate wrapping a choice parameter
    println!("3. Gated Choice Parameter:");
    let gate = ParameterGate::builder("DEPLOY_TARGET")
        .conditions(set)
        .wrap(ChoiceParameter::new(
            "DEPLOY_TARGET",
            vec!["eu-west".to_string(), "us-east".to_string()],
        ))
        .build();

    let values = RequestValues::new()
        .with("branch", "release-2.3")
        .with("env", "prod");
    match gate.is_active_with_trace(&values, UnknownOperatorPolicy::FailOpen) {
        Ok((active, trace)) => {
            println!("   Active: {}", active);
            for entry in trace {
                println!("   - {} => {}", entry.condition, entry.result);
            }
        }
        Err(e) => println!("   Undetermined: {}", e),
    }
    println!("   Value: {:?}\n", gate.create_value_from_str("us-east"));

    // Example 4: An invalid pattern is an error, not a hidden parameter
    println!("4. Invalid Regex:");
    let broken = ConditionSet::all(vec![Condition::new("branch", Operator::Regex, "(unclosed")]);
    println!(
        "   => {:?}",
        paramgate_core::evaluate(&broken, &RequestValues::new().with("branch", "main"))
    );

    println!("\n=== Example Complete ===");
}

//! Literal short-circuit: plain data passed to eval2 returns unchanged

use maplit::hashmap;

use super::env_with;
use crate::data::DataContext;
use crate::eval::eval2;
use crate::value::Value;

#[test]
fn test_scalar_literals_are_identity() {
    assert_eq!(eval2(Value::Num(42.0), None, None), Ok(Value::Num(42.0)));
    assert_eq!(
        eval2(Value::Str("hi".to_string()), None, None),
        Ok(Value::Str("hi".to_string()))
    );
    assert_eq!(eval2(Value::Bool(true), None, None), Ok(Value::Bool(true)));
    assert_eq!(eval2(Value::Null, None, None), Ok(Value::Null));
}

#[test]
fn test_vector_literals_are_identity() {
    // Composite data is still data: it passes through unchanged
    let v = Value::NumVec(vec![1.0, 2.0, 3.0]);
    assert_eq!(eval2(v.clone(), None, None), Ok(v));

    let s = Value::StrVec(vec!["a".to_string(), "b".to_string()]);
    assert_eq!(eval2(s.clone(), None, None), Ok(s));
}

#[test]
fn test_list_literal_is_identity() {
    let list = Value::List(vec![Value::Num(1.0), Value::Str("two".to_string())]);
    assert_eq!(eval2(list.clone(), None, None), Ok(list));
}

#[test]
fn test_literal_ignores_data_and_env() {
    // A literal needs no evaluation, so neither scope is consulted
    let mut data = DataContext::new();
    data.insert("x", Value::Num(99.0));
    let env = env_with(hashmap! {"x".to_string() => Value::Num(1.0)});

    assert_eq!(
        eval2(Value::Num(7.0), Some(&data), Some(&env)),
        Ok(Value::Num(7.0))
    );
}

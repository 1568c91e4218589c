mod common;

use common::{INTRINSICS, MethodBuilder, strings};
use sigscope_java::bytecode::{ClassModel, InMemoryClassIndex, InvokeKind, MethodModel};
use sigscope_java::config::{InferenceConfig, IntrinsicSpec};
use sigscope_java::{Conventions, ReturnTypeResolver, infer};

fn plain() -> Conventions {
    Conventions::from_config(&InferenceConfig::plain()).unwrap()
}

/// `return Foo()` followed by Kotlin's expression null check.
fn checked_new_foo() -> MethodModel {
    MethodBuilder::new("invoke", "()Ljava/lang/Object;")
        .construct("pkg/Foo")
        .dup()
        .ldc_string("Foo()")
        .invoke_static(
            INTRINSICS,
            "checkNotNullExpressionValue",
            "(Ljava/lang/Object;Ljava/lang/String;)V",
        )
        .areturn()
        .build()
}

#[test]
fn test_helper_sequence_is_transparent() {
    let method = checked_new_foo();
    let index = InMemoryClassIndex::new();
    assert_eq!(strings(infer(&method, &index)), vec!["pkg.Foo"]);

    // without the filter the helper call itself is taken as the producer
    let conventions = plain();
    let resolver = ReturnTypeResolver::with_conventions(&conventions);
    assert_eq!(strings(resolver.infer(&method, &index)), vec!["void"]);
}

#[test]
fn test_parameter_checks_before_value() {
    let method = MethodBuilder::new("invoke", "(Lio/jooby/Context;)Ljava/lang/Object;")
        .null_check(1, "ctx")
        .label()
        .line(7)
        .ldc_string("pong")
        .areturn()
        .var(1, "ctx", "Lio/jooby/Context;")
        .build();
    assert_eq!(
        strings(infer(&method, &InMemoryClassIndex::new())),
        vec!["java.lang.String"]
    );
}

#[test]
fn test_type_cast_exception_sequence_is_skipped() {
    let method = MethodBuilder::new("invoke", "()Ljava/lang/Object;")
        .aload(1)
        .dup()
        .other("ifnonnull")
        .new_object("kotlin/TypeCastException")
        .dup()
        .ldc_string("null cannot be cast to non-null type")
        .invoke(
            InvokeKind::Special,
            "kotlin/TypeCastException",
            "<init>",
            "(Ljava/lang/String;)V",
        )
        .other("athrow")
        .label()
        .checkcast("java/util/List")
        .areturn()
        .generic_var(1, "items", "Ljava/util/List;", "Ljava/util/List<Lpkg/Foo;>;")
        .build();
    assert_eq!(
        strings(infer(&method, &InMemoryClassIndex::new())),
        vec!["java.util.List<pkg.Foo>"]
    );
}

#[test]
fn test_custom_helper_owner() {
    let mut config = InferenceConfig::plain();
    config.intrinsics.push(IntrinsicSpec {
        owner: "com/acme/Checks".into(),
        methods: vec!["requireValid".into()],
    });
    let conventions = Conventions::from_config(&config).unwrap();

    let method = MethodBuilder::new("handle", "()Ljava/lang/Object;")
        .construct("pkg/Foo")
        .dup()
        .invoke_static("com/acme/Checks", "requireValid", "(Ljava/lang/Object;)V")
        .areturn()
        .build();
    let resolver = ReturnTypeResolver::with_conventions(&conventions);
    assert_eq!(
        strings(resolver.infer(&method, &InMemoryClassIndex::new())),
        vec!["pkg.Foo"]
    );
}

fn routes_index(extra: Option<MethodModel>) -> InMemoryClassIndex {
    let mut routes = ClassModel::new("pkg/RoutesKt").with_method(
        MethodModel::new("invoke$handler", "(Lio/jooby/Context;)Ljava/util/List;")
            .with_signature("(Lio/jooby/Context;)Ljava/util/List<Lpkg/Foo;>;"),
    );
    if let Some(extra) = extra {
        routes = routes.with_method(extra);
    }
    InMemoryClassIndex::new().with_class(routes)
}

fn accessor_call() -> MethodModel {
    MethodBuilder::new("invoke", "(Lio/jooby/Context;)Ljava/lang/Object;")
        .synthetic()
        .aload(0)
        .aload(1)
        .invoke_static(
            "pkg/RoutesKt",
            "access$invoke$handler",
            "(Lpkg/RoutesKt;Lio/jooby/Context;)Ljava/util/List;",
        )
        .areturn()
        .build()
}

#[test]
fn test_accessor_resolves_to_target_method() {
    let method = accessor_call();
    assert_eq!(
        strings(infer(&method, &routes_index(None))),
        vec!["java.util.List<pkg.Foo>"]
    );

    let conventions = plain();
    let resolver = ReturnTypeResolver::with_conventions(&conventions);
    assert_eq!(
        strings(resolver.infer(&method, &routes_index(None))),
        vec!["java.util.List"]
    );
}

#[test]
fn test_ambiguous_accessor_target_uses_call_descriptor() {
    let overload = MethodModel::new("invoke$handler", "()Ljava/util/List;")
        .with_signature("()Ljava/util/List<Lpkg/Bar;>;");
    assert_eq!(
        strings(infer(&accessor_call(), &routes_index(Some(overload)))),
        vec!["java.util.List"]
    );
}

const LAMBDA_SIGNATURE: &str = concat!(
    "Lkotlin/jvm/internal/Lambda;",
    "Lkotlin/jvm/functions/Function1<Lio/jooby/HandlerContext;Ljava/util/List<Lpkg/Foo;>;>;"
);

fn closure_body(with_check: bool) -> MethodModel {
    let mut builder = MethodBuilder::new("invoke", "(Lio/jooby/HandlerContext;)Ljava/lang/Object;");
    if with_check {
        builder = builder.null_check(1, "$this$get");
    }
    builder
        .aload(0)
        .invoke_virtual("pkg/Service", "load", "()Ljava/lang/Object;")
        .astore(2)
        .aload(2)
        .areturn()
        .var(0, "this", "Lpkg/Routes$1;")
        .var(1, "$this$get", "Lio/jooby/HandlerContext;")
        .var(2, "result", "Ljava/lang/Object;")
        .build()
}

#[test]
fn test_closure_capture_reads_class_signature() {
    let index = InMemoryClassIndex::new()
        .with_class(ClassModel::new("pkg/Routes$1").with_signature(LAMBDA_SIGNATURE));
    assert_eq!(
        strings(infer(&closure_body(true), &index)),
        vec!["java.util.List<pkg.Foo>"]
    );
}

#[test]
fn test_closure_capture_needs_helper_call() {
    let index = InMemoryClassIndex::new()
        .with_class(ClassModel::new("pkg/Routes$1").with_signature(LAMBDA_SIGNATURE));
    assert_eq!(
        strings(infer(&closure_body(false), &index)),
        vec!["java.lang.Object"]
    );
}

#[test]
fn test_closure_capture_rejects_uninformative_result() {
    let index = InMemoryClassIndex::new().with_class(
        ClassModel::new("pkg/Routes$1").with_signature(concat!(
            "Lkotlin/jvm/internal/Lambda;",
            "Lkotlin/jvm/functions/Function1<Lio/jooby/HandlerContext;Ljava/lang/Object;>;"
        )),
    );
    assert_eq!(
        strings(infer(&closure_body(true), &index)),
        vec!["java.lang.Object"]
    );
}

#[test]
fn test_closure_capture_requires_holder() {
    let index = InMemoryClassIndex::new().with_class(
        ClassModel::new("pkg/Routes$1")
            .with_signature("Ljava/lang/Object;Ljava/util/function/Supplier<Lpkg/Foo;>;"),
    );
    assert_eq!(
        strings(infer(&closure_body(true), &index)),
        vec!["java.lang.Object"]
    );
}

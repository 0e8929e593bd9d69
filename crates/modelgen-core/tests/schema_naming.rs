use modelgen_core::schema::Naming;

fn make_naming() -> Naming {
    Naming::default()
}

#[test]
fn default_appends_suffix_without_casing() {
    let naming = make_naming();

    assert_eq!(naming.model_name("user_profile"), "user_profile_model");
    assert_eq!(naming.file_name("user_profile_model", "user_profile"), "user_profile");
    assert_eq!(naming.attr_name("created_at"), "created_at");
}

#[test]
fn camel_case_cases_the_suffix_too() {
    let naming = Naming {
        camel_case: true,
        ..make_naming()
    };

    assert_eq!(naming.model_name("user_profile"), "UserProfileModel");
}

#[test]
fn camel_case_without_suffix() {
    let naming = Naming {
        camel_case: true,
        model_suffix: None,
        file_name_matches_model: true,
        ..make_naming()
    };

    let model = naming.model_name("user_profile");
    assert_eq!(model, "UserProfile");
    assert_eq!(naming.file_name(&model, "user_profile"), "UserProfile");
}

#[test]
fn file_and_attribute_case_options_are_independent() {
    let naming = Naming {
        file_name_camel_case: true,
        ..make_naming()
    };

    assert_eq!(naming.file_name("user_profile_model", "user_profile"), "userProfile");
    assert_eq!(naming.attr_name("created_at"), "created_at");
    assert_eq!(naming.model_name("user_profile"), "user_profile_model");

    let naming = Naming {
        attr_camel_case: true,
        ..make_naming()
    };

    assert_eq!(naming.attr_name("created_at"), "createdAt");
    assert_eq!(naming.file_name("user_profile_model", "user_profile"), "user_profile");
}

#[test]
fn custom_suffix() {
    let naming = Naming {
        model_suffix: Some("entity".to_string()),
        camel_case: true,
        ..make_naming()
    };

    assert_eq!(naming.model_name("order_item"), "OrderItemEntity");
}

#[test]
fn singular_model_names() {
    let naming = Naming {
        singular: true,
        camel_case: true,
        model_suffix: None,
        ..make_naming()
    };

    assert_eq!(naming.model_name("users"), "User");
    assert_eq!(naming.model_name("user"), "User");
    assert_eq!(naming.model_name("categories"), "Category");
}

#[test]
fn names_are_stable() {
    let naming = Naming {
        camel_case: true,
        attr_camel_case: true,
        ..make_naming()
    };

    assert_eq!(naming.model_name("blog_post"), naming.model_name("blog_post"));
    assert_eq!(naming.attr_name("post_id"), "postId");
}
